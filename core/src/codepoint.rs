//! The code-point stream (§4.1).
//!
//! This is the leaf of the pipeline: it turns already-decoded text
//! fragments (the text decoder itself is an external collaborator, §1)
//! into a sequence of [`CodePoint`] values, each stamped with a
//! single-code-point [`Span`]. Fragment boundaries may fall between any
//! two code points but never inside one — the caller is responsible for
//! handing this layer whole `char`s (e.g. via `str::chars`), so there is
//! no partial-UTF-8 state to carry across fragments here.

use crate::span::{Cursor, SourceUrl, Span};

/// A single Unicode scalar value plus the one-code-point [`Span`] it
/// occupies in its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodePoint {
    value: char,
    span: Span,
}

impl CodePoint {
    #[inline]
    #[must_use]
    pub fn new(value: char, span: Span) -> Self {
        Self { value, span }
    }

    #[inline]
    #[must_use]
    pub const fn value(&self) -> char {
        self.value
    }

    #[inline]
    #[must_use]
    pub fn span(&self) -> &Span {
        &self.span
    }
}

/// Converts text fragments into a batch of [`CodePoint`]s, advancing a
/// running [`Cursor`] across fragment boundaries.
///
/// One [`CodePointStream`] corresponds to one source: `feed` is called
/// once per arriving fragment (§4.1 "emit one batch per input fragment"),
/// and the returned `Vec<CodePoint>` is handed straight to the lexical
/// engine as one input batch.
#[derive(Debug, Clone)]
pub struct CodePointStream {
    cursor: Cursor,
    source: SourceUrl,
}

impl CodePointStream {
    #[inline]
    #[must_use]
    pub fn new(source: SourceUrl) -> Self {
        Self {
            cursor: Cursor::START,
            source,
        }
    }

    /// The cursor immediately after the last code point fed so far.
    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Converts one text fragment into a batch of [`CodePoint`]s.
    pub fn feed(&mut self, fragment: &str) -> Vec<CodePoint> {
        let mut out = Vec::with_capacity(fragment.len());
        for ch in fragment.chars() {
            let begin = self.cursor;
            self.cursor = self.cursor.advance(ch);
            let span = Span::new(begin, self.cursor, self.source.clone());
            out.push(CodePoint::new(ch, span));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_advances_cursor_and_stamps_spans() {
        let mut stream = CodePointStream::new(SourceUrl::anonymous());
        let points = stream.feed("a\nb");
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].value(), 'a');
        assert_eq!(points[0].span().begin(), Cursor::START);
        assert_eq!(points[1].value(), '\n');
        assert_eq!(points[2].value(), 'b');
        assert_eq!(points[2].span().begin(), Cursor::new(2, 0, 1));
        assert_eq!(stream.cursor(), Cursor::new(3, 1, 1));
    }

    #[test]
    fn feed_across_fragments_is_contiguous() {
        let mut stream = CodePointStream::new(SourceUrl::anonymous());
        let mut all = stream.feed("ab");
        all.extend(stream.feed("cd"));
        for (a, b) in all.iter().zip(all.iter().skip(1)) {
            assert_eq!(a.span().end(), b.span().begin());
        }
    }

    #[test]
    fn single_fragment_and_split_fragments_agree() {
        let mut whole = CodePointStream::new(SourceUrl::anonymous());
        let whole_points = whole.feed("hello\nworld");

        let mut split = CodePointStream::new(SourceUrl::anonymous());
        let mut split_points = split.feed("hello");
        split_points.extend(split.feed("\nworld"));

        assert_eq!(whole_points.len(), split_points.len());
        for (a, b) in whole_points.iter().zip(split_points.iter()) {
            assert_eq!(a.value(), b.value());
            assert_eq!(a.span(), b.span());
        }
    }
}
