//! The recoverable/fatal syntactic error taxonomy (§7, §11).

use thiserror::Error;

use crate::span::Span;
use crate::token::TokenKind;
use crate::EngineError;

/// An error raised while parsing a [`crate::token::Token`] stream into
/// syntax nodes.
///
/// `Expected`/`UnexpectedEof` are ordinarily recoverable: `maybe`/`first`/
/// `furthest` catch and roll back on them. Once a production commits to a
/// shape (e.g. it has already consumed a call's opening `(`), the
/// `fatal()` combinator wraps the same error in [`ParseError::Fatal`] so
/// it propagates instead of being swallowed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected {expected}, found {found} at {span}")]
    Expected {
        expected: &'static str,
        found: TokenKind,
        span: Span,
    },

    #[error("expected {expected}, found end of input at {span}")]
    UnexpectedEof { expected: &'static str, span: Span },

    #[error(transparent)]
    Fatal(Box<ParseError>),

    /// A resource bound from `ParseConfig` was exceeded (§4.2, §11):
    /// always fatal, never a grammar-level recoverable failure.
    #[error(transparent)]
    Resource(#[from] EngineError),
}

impl ParseError {
    /// Marks this error as fatal, matching the `fatal()` combinator's
    /// contract of a non-catchable failure (§4.2, §7).
    #[must_use]
    pub fn into_fatal(self) -> Self {
        match self {
            Self::Fatal(_) => self,
            other => Self::Fatal(Box::new(other)),
        }
    }

    /// The span the error points at. `None` for [`Self::Resource`]: an
    /// engine-invariant violation isn't tied to a single token.
    #[must_use]
    pub fn span(&self) -> Option<&Span> {
        match self {
            Self::Expected { span, .. } | Self::UnexpectedEof { span, .. } => Some(span),
            Self::Fatal(inner) => inner.span(),
            Self::Resource(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::{Cursor, SourceUrl};

    fn span() -> Span {
        Span::empty_at(Cursor::START, SourceUrl::anonymous())
    }

    #[test]
    fn into_fatal_wraps_once() {
        let err = ParseError::UnexpectedEof {
            expected: "identifier",
            span: span(),
        }
        .into_fatal();
        assert!(matches!(err, ParseError::Fatal(_)));
        let twice = err.clone().into_fatal();
        assert_eq!(err, twice);
    }

    #[test]
    fn span_reaches_through_fatal_wrapper() {
        let inner = ParseError::Expected {
            expected: ")",
            found: TokenKind::End,
            span: span(),
        };
        let fatal = inner.clone().into_fatal();
        assert_eq!(fatal.span(), inner.span());
    }
}
