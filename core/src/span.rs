//! Source positions and spans.
//!
//! [`Cursor`] and [`Span`] are the positional vocabulary shared by every
//! stage of the pipeline: the code-point stream stamps a [`Span`] on each
//! [`crate::codepoint::CodePoint`], the lexer stamps one on each
//! [`crate::token::Token`], and the syntactic stage derives a node's span
//! from the span of its first and last consumed token.

use std::{fmt, sync::Arc};

/// A position within a source, counted in code points (not bytes, not
/// UTF-16 code units).
///
/// `position` is a 0-based absolute code-point offset from the start of
/// the source. `line` and `column` are also 0-based; callers that render
/// a [`Diagnostic`](crate::diagnostics::Diagnostic) add 1 to both for
/// human display, per §6.
///
/// Only `U+000A` (LF) moves `line`/`column`; this is a deliberate split
/// from the lexer's own, richer `LineTerminator` token kind (§9 "CR/LF
/// handling split") — cursor bookkeeping is a display concern, lexical
/// line terminators are a language concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor {
    position: usize,
    column: usize,
    line: usize,
}

impl Cursor {
    /// The cursor at the very start of a source.
    pub const START: Self = Self {
        position: 0,
        column: 0,
        line: 0,
    };

    /// Creates a new cursor from its three 0-based components.
    #[inline]
    #[must_use]
    pub const fn new(position: usize, column: usize, line: usize) -> Self {
        Self {
            position,
            column,
            line,
        }
    }

    /// The code-point offset from the start of the source.
    #[inline]
    #[must_use]
    pub const fn position(self) -> usize {
        self.position
    }

    /// The 0-based column on the current line.
    #[inline]
    #[must_use]
    pub const fn column(self) -> usize {
        self.column
    }

    /// The 0-based line number.
    #[inline]
    #[must_use]
    pub const fn line(self) -> usize {
        self.line
    }

    /// Advances the cursor by one code point, applying the §4.1 line-break
    /// rule: `U+000A` resets the column and increments the line; every
    /// other code point just advances the column.
    #[inline]
    #[must_use]
    pub const fn advance(self, code_point: char) -> Self {
        if code_point == '\u{000A}' {
            Self {
                position: self.position + 1,
                column: 0,
                line: self.line + 1,
            }
        } else {
            Self {
                position: self.position + 1,
                column: self.column + 1,
                line: self.line,
            }
        }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// An opaque identifier for the source a span was read from.
///
/// Resolution of user-supplied strings into a [`SourceUrl`] (file path vs.
/// `scheme://` URL vs. base64url `data:` wrapping) is a boundary concern
/// (§6) and lives outside this crate; `SourceUrl` itself is just the
/// already-resolved display string, cheaply clonable since every token
/// and span carries one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceUrl(Arc<str>);

impl SourceUrl {
    /// Wraps an already-resolved source identifier.
    #[inline]
    pub fn new(url: impl Into<Arc<str>>) -> Self {
        Self(url.into())
    }

    /// A placeholder source url for call-site-constructed spans (tests,
    /// synthetic nodes) that were never read from an actual source.
    #[inline]
    #[must_use]
    pub fn anonymous() -> Self {
        Self(Arc::from("<anonymous>"))
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An inclusive-begin, exclusive-end range of [`Cursor`]s plus the source
/// they were read from.
///
/// The source url is carried for diagnostics only: it is deliberately
/// excluded from [`PartialEq`]/[`Hash`] so that two spans produced from
/// equivalent-but-differently-labeled input still compare equal (§3).
#[derive(Debug, Clone)]
pub struct Span {
    begin: Cursor,
    end: Cursor,
    source: SourceUrl,
}

impl Span {
    /// Creates a span covering `[begin, end)` of `source`.
    #[inline]
    #[must_use]
    pub fn new(begin: Cursor, end: Cursor, source: SourceUrl) -> Self {
        debug_assert!(
            begin <= end,
            "a span cannot start after its end: {begin:?} > {end:?}"
        );
        Self { begin, end, source }
    }

    /// A zero-length span at `cursor`, used for call-site-constructed
    /// nodes that don't correspond to any real token.
    #[inline]
    #[must_use]
    pub fn empty_at(cursor: Cursor, source: SourceUrl) -> Self {
        Self {
            begin: cursor,
            end: cursor,
            source,
        }
    }

    #[inline]
    #[must_use]
    pub const fn begin(&self) -> Cursor {
        self.begin
    }

    #[inline]
    #[must_use]
    pub const fn end(&self) -> Cursor {
        self.end
    }

    #[inline]
    #[must_use]
    pub fn source(&self) -> &SourceUrl {
        &self.source
    }

    /// Number of code points covered by this span.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.position - self.begin.position
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.begin.position == self.end.position
    }

    /// The span covering both `self` and `other`. Per §3, this is the
    /// `around(a, b)` operation used to derive a syntax node's span from
    /// its first and last consumed token.
    #[inline]
    #[must_use]
    pub fn around(&self, other: &Self) -> Self {
        let begin = if self.begin <= other.begin {
            self.begin
        } else {
            other.begin
        };
        let end = if self.end >= other.end {
            self.end
        } else {
            other.end
        };
        Self {
            begin,
            end,
            source: self.source.clone(),
        }
    }
}

impl PartialEq for Span {
    fn eq(&self, other: &Self) -> bool {
        self.begin == other.begin && self.end == other.end
    }
}

impl Eq for Span {}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.begin, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn src() -> SourceUrl {
        SourceUrl::new("file:///test.js")
    }

    #[test]
    fn cursor_advance_tracks_line_and_column() {
        let c = Cursor::START;
        let c = c.advance('a');
        assert_eq!(c, Cursor::new(1, 1, 0));
        let c = c.advance('\n');
        assert_eq!(c, Cursor::new(2, 0, 1));
        let c = c.advance('b');
        assert_eq!(c, Cursor::new(3, 1, 1));
    }

    #[test]
    fn cursor_only_lf_is_a_line_break() {
        let c = Cursor::START.advance('\r');
        assert_eq!(c, Cursor::new(1, 1, 0));
    }

    #[test]
    fn span_source_url_excluded_from_equality() {
        let a = Span::new(Cursor::START, Cursor::new(1, 1, 0), SourceUrl::new("a.js"));
        let b = Span::new(Cursor::START, Cursor::new(1, 1, 0), SourceUrl::new("b.js"));
        assert_eq!(a, b);
    }

    #[test]
    fn span_around_covers_both() {
        let a = Span::new(Cursor::new(0, 0, 0), Cursor::new(1, 1, 0), src());
        let b = Span::new(Cursor::new(4, 4, 0), Cursor::new(5, 5, 0), src());
        let around = a.around(&b);
        assert_eq!(around.begin(), Cursor::new(0, 0, 0));
        assert_eq!(around.end(), Cursor::new(5, 5, 0));
    }

    #[test]
    fn span_len_matches_position_delta() {
        let s = Span::new(Cursor::new(2, 2, 0), Cursor::new(5, 5, 0), src());
        assert_eq!(s.len(), 3);
    }
}
