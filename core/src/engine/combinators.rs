//! The standard combinator library every production is built from
//! (§4.2's command vocabulary, generalized to the backtracking
//! combinators named throughout §7-§9).

use super::core_engine::{Engine, Signal};
use crate::failure::Failure;

/// Reads the item under the cursor without advancing it, converting an
/// end-of-stream into a caller-supplied grammar error.
pub fn peek<'e, I, E>(
    engine: &'e Engine<I>,
    on_eof: impl FnOnce() -> E,
) -> Result<&'e I, Failure<E>>
where
    I: Clone,
{
    match engine.peek() {
        Ok(item) => Ok(item),
        Err(Signal::NeedMore) => Err(Failure::Incomplete),
        Err(Signal::EndOfStream) => Err(Failure::Recoverable(on_eof())),
    }
}

/// Reads and advances past the item under the cursor, converting an
/// end-of-stream into a caller-supplied grammar error.
pub fn consume<I, E>(engine: &mut Engine<I>, on_eof: impl FnOnce() -> E) -> Result<I, Failure<E>>
where
    I: Clone,
{
    match engine.consume() {
        Ok(item) => Ok(item),
        Err(Signal::NeedMore) => Err(Failure::Incomplete),
        Err(Signal::EndOfStream) => Err(Failure::Recoverable(on_eof())),
    }
}

/// Peeks without raising on end-of-stream: `Ok(None)` means the stream is
/// genuinely exhausted, not just momentarily short of input (which still
/// raises `Failure::Incomplete`, since that case isn't a yes/no answer
/// yet).
pub fn try_peek<'e, I, E>(engine: &'e Engine<I>) -> Result<Option<&'e I>, Failure<E>>
where
    I: Clone,
{
    match engine.peek() {
        Ok(item) => Ok(Some(item)),
        Err(Signal::EndOfStream) => Ok(None),
        Err(Signal::NeedMore) => Err(Failure::Incomplete),
    }
}

/// Consumes without raising on end-of-stream; see [`try_peek`].
pub fn try_consume<I, E>(engine: &mut Engine<I>) -> Result<Option<I>, Failure<E>>
where
    I: Clone,
{
    match engine.consume() {
        Ok(item) => Ok(Some(item)),
        Err(Signal::EndOfStream) => Ok(None),
        Err(Signal::NeedMore) => Err(Failure::Incomplete),
    }
}

/// The cursor's current offset into the buffered window.
#[inline]
#[must_use]
pub fn position<I>(engine: &Engine<I>) -> usize {
    engine.position()
}

/// Moves the cursor to an absolute offset, returning its previous value.
#[inline]
pub fn set_position<I>(engine: &mut Engine<I>, position: usize) -> usize {
    engine.set_position(position)
}

/// Consumes the item under the cursor if `predicate` accepts it;
/// otherwise raises a recoverable failure built from the rejected item
/// (or `None` on end-of-stream). The basis for `consumeInstanceOf`/
/// `consumeKind`-style productions: callers supply a predicate over the
/// item's tag and an error constructor.
pub fn consume_if<I, E>(
    engine: &mut Engine<I>,
    predicate: impl FnOnce(&I) -> bool,
    on_mismatch: impl FnOnce(Option<&I>) -> E,
) -> Result<I, Failure<E>>
where
    I: Clone,
{
    match engine.peek() {
        Ok(item) if predicate(item) => {
            Ok(engine.consume().unwrap_or_else(|_| unreachable!("peek just succeeded")))
        }
        Ok(item) => Err(Failure::Recoverable(on_mismatch(Some(item)))),
        Err(Signal::NeedMore) => Err(Failure::Incomplete),
        Err(Signal::EndOfStream) => Err(Failure::Recoverable(on_mismatch(None))),
    }
}

/// Succeeds without consuming anything. The identity production used
/// where a grammar rule allows an empty alternative.
#[inline]
pub fn null<I, E>(_engine: &mut Engine<I>) -> Result<(), Failure<E>> {
    Ok(())
}

/// Tries `production`; on `Recoverable` failure, rewinds the cursor and
/// returns `Ok(None)` instead of propagating. `Fatal` and `Incomplete`
/// still propagate untouched — once a production has committed past the
/// point of backtracking, `maybe` must not paper over it.
pub fn maybe<I, O, E>(
    engine: &mut Engine<I>,
    production: impl FnOnce(&mut Engine<I>) -> Result<O, Failure<E>>,
) -> Result<Option<O>, Failure<E>> {
    let start = engine.position();
    match production(engine) {
        Ok(value) => Ok(Some(value)),
        Err(Failure::Recoverable(_)) => {
            engine.set_position(start);
            Ok(None)
        }
        Err(other) => Err(other),
    }
}

/// Promotes any `Recoverable` failure from `production` to `Fatal`. Used
/// once a production has consumed a token that only makes sense as the
/// start of one particular rule — a mismatch past that point is a real
/// syntax error, not a cue to try a sibling alternative.
pub fn fatal<I, O, E>(
    engine: &mut Engine<I>,
    production: impl FnOnce(&mut Engine<I>) -> Result<O, Failure<E>>,
) -> Result<O, Failure<E>> {
    production(engine).map_err(Failure::into_fatal)
}

/// Runs `production`, then rewinds the cursor back to where it started
/// regardless of outcome, returning both the result and the position it
/// would have left the cursor at. Used for bounded lookahead decisions
/// (e.g. distinguishing a division operator from a regex literal) that
/// must not consume input themselves.
pub fn look_ahead<I, O, E>(
    engine: &mut Engine<I>,
    production: impl FnOnce(&mut Engine<I>) -> Result<O, Failure<E>>,
) -> Result<(O, usize), Failure<E>> {
    let start = engine.position();
    let result = production(engine)?;
    let reached = engine.position();
    engine.set_position(start);
    Ok((result, reached))
}

/// Repeats `production` via [`maybe`] until it stops matching, collecting
/// every success. Never fails itself: a first iteration that doesn't
/// match just yields an empty `Vec`.
pub fn many<I, O, E>(
    engine: &mut Engine<I>,
    mut production: impl FnMut(&mut Engine<I>) -> Result<O, Failure<E>>,
) -> Result<Vec<O>, Failure<E>> {
    let mut out = Vec::new();
    loop {
        match maybe(engine, |e| production(e))? {
            Some(value) => out.push(value),
            None => break,
        }
    }
    Ok(out)
}

/// A boxed alternative for [`first`]/[`furthest`], allowing a fixed set
/// of differently-typed closures to share one `Vec`.
pub type Branch<'a, I, O, E> = Box<dyn FnMut(&mut Engine<I>) -> Result<O, Failure<E>> + 'a>;

/// Tries each branch from the same starting position, in order, and
/// returns the first one that succeeds. If every branch fails
/// recoverably, reports the failure of whichever branch consumed the
/// most input before failing (ties favor the earliest branch) — the
/// "furthest failure" heuristic that tends to surface the most specific
/// diagnostic (§7).
pub fn first<I, O, E>(engine: &mut Engine<I>, mut branches: Vec<Branch<'_, I, O, E>>) -> Result<O, Failure<E>> {
    let start = engine.position();
    let mut furthest_failure: Option<(usize, Failure<E>)> = None;
    for branch in branches.iter_mut() {
        engine.set_position(start);
        match branch(engine) {
            Ok(value) => return Ok(value),
            Err(Failure::Incomplete) => return Err(Failure::Incomplete),
            Err(failure @ Failure::Fatal(_)) => return Err(failure),
            Err(failure @ Failure::Recoverable(_)) => {
                let reached = engine.position();
                let replace = furthest_failure
                    .as_ref()
                    .is_none_or(|(best, _)| reached > *best);
                if replace {
                    furthest_failure = Some((reached, failure));
                }
            }
        }
    }
    engine.set_position(start);
    Err(furthest_failure
        .map(|(_, failure)| failure)
        .unwrap_or(Failure::Incomplete))
}

/// Tries every branch from the same starting position and keeps the
/// successful one that consumed the most input, rather than stopping at
/// the first match — useful when alternatives overlap and the longest
/// match is the correct one. Falls back to the furthest recoverable
/// failure if no branch succeeds.
pub fn furthest<I, O, E>(
    engine: &mut Engine<I>,
    mut branches: Vec<Branch<'_, I, O, E>>,
) -> Result<O, Failure<E>> {
    let start = engine.position();
    let mut best_success: Option<(usize, O)> = None;
    let mut furthest_failure: Option<(usize, Failure<E>)> = None;
    for branch in branches.iter_mut() {
        engine.set_position(start);
        match branch(engine) {
            Ok(value) => {
                let reached = engine.position();
                let better = best_success.as_ref().is_none_or(|(best, _)| reached > *best);
                if better {
                    best_success = Some((reached, value));
                }
            }
            Err(Failure::Incomplete) => return Err(Failure::Incomplete),
            Err(failure @ Failure::Fatal(_)) => return Err(failure),
            Err(failure @ Failure::Recoverable(_)) => {
                let reached = engine.position();
                let replace = furthest_failure
                    .as_ref()
                    .is_none_or(|(best, _)| reached > *best);
                if replace {
                    furthest_failure = Some((reached, failure));
                }
            }
        }
    }
    if let Some((reached, value)) = best_success {
        engine.set_position(reached);
        return Ok(value);
    }
    engine.set_position(start);
    Err(furthest_failure
        .map(|(_, failure)| failure)
        .unwrap_or(Failure::Incomplete))
}
