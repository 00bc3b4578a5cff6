//! The single user-facing error surface (§6, §11): a fatal [`Failure`]
//! that escapes the pipeline is rendered into a [`Diagnostic`] here and
//! nowhere else — internal error enums (`LexError`, `ParseError`,
//! `EngineError`) are not meant to be printed directly by callers.

use std::fmt;

use crate::lexer::LexError;
use crate::parser::ParseError;
use crate::span::{SourceUrl, Span};

impl LexError {
    /// The span of the opening delimiter a fatal lexical error points at.
    #[must_use]
    pub fn span(&self) -> &Span {
        match self {
            Self::UnterminatedString { opened_at }
            | Self::UnterminatedBlockComment { opened_at }
            | Self::UnterminatedTemplate { opened_at } => opened_at,
        }
    }
}

/// A rendered fatal diagnostic: source url plus the 1-based line/column of
/// the offending span's beginning, plus a message (§6).
///
/// `Display` is exactly the format string §6 prescribes:
/// `"{source-url}:{line+1}:{column+1}: {message}"` — `Cursor`'s own
/// `Display` already performs the 0-based-to-1-based conversion, so this
/// type just arranges the pieces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    source: SourceUrl,
    span: Span,
    message: String,
}

impl Diagnostic {
    #[must_use]
    pub fn new(source: SourceUrl, span: Span, message: impl Into<String>) -> Self {
        Self {
            source,
            span,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn source(&self) -> &SourceUrl {
        &self.source
    }

    #[must_use]
    pub fn span(&self) -> &Span {
        &self.span
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.source, self.span.begin(), self.message)
    }
}

impl From<&LexError> for Diagnostic {
    fn from(err: &LexError) -> Self {
        let span = err.span().clone();
        let source = span.source().clone();
        let diagnostic = Self::new(source, span, err.to_string());
        tracing::error!(diagnostic = %diagnostic, "fatal lexical error");
        diagnostic
    }
}

impl From<&ParseError> for Diagnostic {
    fn from(err: &ParseError) -> Self {
        let span = err
            .span()
            .cloned()
            .unwrap_or_else(|| Span::empty_at(crate::span::Cursor::START, SourceUrl::anonymous()));
        let source = span.source().clone();
        let diagnostic = Self::new(source, span, err.to_string());
        tracing::error!(diagnostic = %diagnostic, "fatal syntactic error");
        diagnostic
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Cursor;

    #[test]
    fn display_matches_source_line_column_message_format() {
        let source = SourceUrl::new("file:///a.js");
        let span = Span::new(Cursor::new(5, 3, 1), Cursor::new(6, 4, 1), source.clone());
        let diagnostic = Diagnostic::new(source, span, "unexpected end of input");
        assert_eq!(
            diagnostic.to_string(),
            "file:///a.js:2:4: unexpected end of input"
        );
    }

    #[test]
    fn parse_error_converts_using_its_own_span() {
        let source = SourceUrl::new("file:///b.js");
        let span = Span::empty_at(Cursor::new(10, 10, 0), source);
        let err = ParseError::UnexpectedEof {
            expected: "identifier",
            span: span.clone(),
        };
        let diagnostic = Diagnostic::from(&err);
        assert_eq!(diagnostic.span(), &span);
    }

    #[test]
    fn lex_error_converts_using_opened_at_span() {
        let source = SourceUrl::anonymous();
        let span = Span::empty_at(Cursor::START, source);
        let err = LexError::UnterminatedString {
            opened_at: span.clone(),
        };
        let diagnostic = Diagnostic::from(&err);
        assert_eq!(diagnostic.span(), &span);
        assert!(diagnostic.message().contains("unterminated string"));
    }

    #[test]
    fn resource_error_has_no_token_span_but_still_renders() {
        use crate::EngineError;
        let err = ParseError::Resource(EngineError::CommitWithoutProgress);
        let diagnostic = Diagnostic::from(&err);
        assert_eq!(diagnostic.source(), &SourceUrl::anonymous());
    }
}
