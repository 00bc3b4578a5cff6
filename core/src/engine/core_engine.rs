//! [`Engine`]: the buffered window a coroutine runs against (§4.2, §5).

use crate::{EngineError, Failure};

/// Why [`Engine::peek`]/[`Engine::consume`] could not produce an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// The buffer is exhausted but the stream is not [`Engine::close`]d —
    /// more input may still arrive.
    NeedMore,
    /// The buffer is exhausted and the stream is closed: this is a real
    /// end of input, not a temporary gap.
    EndOfStream,
}

/// The result of driving one coroutine invocation to completion via
/// [`Engine::run_once`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<O, E> {
    /// The coroutine committed and produced `O`.
    Emitted(O),
    /// The coroutine raised [`Failure::Incomplete`] and the stream is
    /// still open; call `feed` and retry.
    NeedMore,
    /// The coroutine raised [`Failure::Incomplete`] but the stream is
    /// already closed: there will never be more input to retry with.
    EndOfInput,
    /// The coroutine raised a grammar-level `Failure::Recoverable` or
    /// `Failure::Fatal` that reached the top uncaught.
    Failed(E),
    /// The engine's own invariant was violated (§7).
    Invariant(EngineError),
}

/// A buffered window over a stream of `Input` items, plus the cursor a
/// coroutine advances while deciding whether to commit.
///
/// `Input` is generic: the lexical stage runs an `Engine<CodePoint>`,
/// the syntactic stage runs an `Engine<Token>` (§4.1, §4.3).
#[derive(Debug, Clone)]
pub struct Engine<Input> {
    buffer: Vec<Input>,
    cursor: usize,
    closed: bool,
    consumed_total: usize,
}

impl<Input> Default for Engine<Input> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Input> Engine<Input> {
    /// Creates an empty, open engine.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            cursor: 0,
            closed: false,
            consumed_total: 0,
        }
    }

    /// Appends one input batch to the buffer (§4.1 "one batch per
    /// fragment"). Has no effect on the cursor.
    pub fn feed(&mut self, batch: impl IntoIterator<Item = Input>) {
        self.buffer.extend(batch);
    }

    /// Marks the stream closed: no more `feed` calls will ever add input.
    /// Idempotent.
    #[inline]
    pub fn close(&mut self) {
        self.closed = true;
    }

    #[inline]
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// The cursor's current offset into the buffered window, i.e. how
    /// many items the in-flight coroutine invocation has tentatively
    /// consumed so far.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> usize {
        self.cursor
    }

    /// Moves the cursor to an absolute offset (used by backtracking
    /// combinators to rewind after a failed alternative). Returns the
    /// previous position.
    #[inline]
    pub fn set_position(&mut self, position: usize) -> usize {
        let previous = self.cursor;
        self.cursor = position;
        previous
    }

    /// Total number of items ever committed by this engine, across every
    /// `run_once` call — the figure `ParseConfig::max_tokens` bounds.
    #[inline]
    #[must_use]
    pub const fn consumed_total(&self) -> usize {
        self.consumed_total
    }

    /// How many buffered-but-uncommitted items remain.
    #[inline]
    #[must_use]
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }
}

impl<Input: Clone> Engine<Input> {
    /// Looks at the item the cursor currently points to without
    /// advancing it.
    pub fn peek(&self) -> Result<&Input, Signal> {
        match self.buffer.get(self.cursor) {
            Some(item) => Ok(item),
            None if self.closed => Err(Signal::EndOfStream),
            None => Err(Signal::NeedMore),
        }
    }

    /// Looks `offset` items past the cursor without advancing it.
    pub fn peek_at(&self, offset: usize) -> Result<&Input, Signal> {
        match self.buffer.get(self.cursor + offset) {
            Some(item) => Ok(item),
            None if self.closed => Err(Signal::EndOfStream),
            None => Err(Signal::NeedMore),
        }
    }

    /// Returns the item under the cursor and advances it by one.
    pub fn consume(&mut self) -> Result<Input, Signal> {
        let item = self.peek()?.clone();
        self.cursor += 1;
        Ok(item)
    }

    /// The items consumed so far by the in-flight coroutine invocation,
    /// i.e. `buffer[0..cursor]`. Used by a dispatch coroutine to
    /// reconstruct a payload/span from exactly what it consumed, before
    /// `run_once` commits and drops this prefix.
    #[inline]
    #[must_use]
    pub fn consumed_slice(&self) -> &[Input] {
        &self.buffer[..self.cursor]
    }

    /// Drops the first `count` buffered items and resets the cursor to
    /// zero; called once a coroutine invocation commits.
    fn commit(&mut self, count: usize) {
        self.buffer.drain(0..count);
        self.cursor = 0;
        self.consumed_total += count;
    }

    /// Drives one coroutine invocation to completion (§4.2's operating
    /// cycle): resets the cursor, runs `coroutine`, and interprets its
    /// result.
    ///
    /// - `Ok(output)` with a non-zero cursor commits the consumed
    ///   prefix and returns [`Outcome::Emitted`]. A zero cursor is an
    ///   engine-invariant violation ([`EngineError::CommitWithoutProgress`])
    ///   rather than silently looping.
    /// - `Err(Failure::Incomplete)` rewinds to the start and reports
    ///   [`Outcome::NeedMore`] (open stream) or [`Outcome::EndOfInput`]
    ///   (closed stream) — nothing was committed.
    /// - `Err(Failure::Recoverable(e))` / `Err(Failure::Fatal(e))`
    ///   reaching the top uncaught becomes [`Outcome::Failed`].
    pub fn run_once<O, E>(
        &mut self,
        coroutine: impl FnOnce(&mut Self) -> Result<O, Failure<E>>,
    ) -> Outcome<O, E> {
        self.cursor = 0;
        let span = tracing::debug_span!("coroutine", buffered = self.buffer.len());
        let result = span.in_scope(|| coroutine(self));
        match result {
            Ok(output) => {
                if self.cursor == 0 {
                    return Outcome::Invariant(EngineError::CommitWithoutProgress);
                }
                let consumed = self.cursor;
                self.commit(consumed);
                tracing::trace!(
                    cursor = self.consumed_total,
                    committed = consumed,
                    "engine commit"
                );
                Outcome::Emitted(output)
            }
            Err(Failure::Incomplete) => {
                self.cursor = 0;
                if self.closed {
                    Outcome::EndOfInput
                } else {
                    Outcome::NeedMore
                }
            }
            Err(Failure::Recoverable(e)) | Err(Failure::Fatal(e)) => Outcome::Failed(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_reports_need_more_on_open_stream() {
        let engine: Engine<char> = Engine::new();
        assert_eq!(engine.peek(), Err(Signal::NeedMore));
    }

    #[test]
    fn peek_reports_end_of_stream_once_closed() {
        let mut engine: Engine<char> = Engine::new();
        engine.close();
        assert_eq!(engine.peek(), Err(Signal::EndOfStream));
    }

    #[test]
    fn consume_advances_cursor() {
        let mut engine: Engine<char> = Engine::new();
        engine.feed(['a', 'b']);
        assert_eq!(engine.consume(), Ok('a'));
        assert_eq!(engine.position(), 1);
        assert_eq!(engine.consume(), Ok('b'));
        assert_eq!(engine.position(), 2);
    }

    #[test]
    fn run_once_commits_on_success() {
        let mut engine: Engine<char> = Engine::new();
        engine.feed(['a', 'b', 'c']);
        let outcome = engine.run_once(|e| -> Result<char, Failure<()>> {
            let c = e.consume().map_err(|_| Failure::Incomplete)?;
            Ok(c)
        });
        assert_eq!(outcome, Outcome::Emitted('a'));
        assert_eq!(engine.buffered_len(), 2);
        assert_eq!(engine.consumed_total(), 1);
    }

    #[test]
    fn run_once_rewinds_on_incomplete() {
        let mut engine: Engine<char> = Engine::new();
        engine.feed(['a']);
        let outcome = engine.run_once(|e| -> Result<char, Failure<()>> {
            let _ = e.consume().map_err(|_| Failure::Incomplete)?;
            let _ = e.consume().map_err(|_| Failure::Incomplete)?;
            Ok('x')
        });
        assert_eq!(outcome, Outcome::NeedMore);
        assert_eq!(engine.buffered_len(), 1);
        assert_eq!(engine.position(), 0);
    }

    #[test]
    fn run_once_reports_end_of_input_once_closed() {
        let mut engine: Engine<char> = Engine::new();
        engine.close();
        let outcome = engine.run_once(|e| -> Result<char, Failure<()>> {
            e.consume().map_err(|_| Failure::Incomplete)
        });
        assert_eq!(outcome, Outcome::EndOfInput);
    }

    #[test]
    fn run_once_flags_commit_without_progress() {
        let mut engine: Engine<char> = Engine::new();
        engine.feed(['a']);
        let outcome = engine.run_once(|_| -> Result<char, Failure<()>> { Ok('z') });
        assert_eq!(
            outcome,
            Outcome::Invariant(EngineError::CommitWithoutProgress)
        );
    }

    #[test]
    fn run_once_surfaces_fatal_failures() {
        let mut engine: Engine<char> = Engine::new();
        engine.feed(['a']);
        let outcome = engine.run_once(|e| -> Result<char, Failure<&'static str>> {
            let _ = e.consume();
            Err(Failure::Fatal("boom"))
        });
        assert_eq!(outcome, Outcome::Failed("boom"));
    }
}
