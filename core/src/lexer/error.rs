//! The fatal-lexical error taxonomy (§7, §11).
//!
//! There is no recoverable-lexical variant: per §7, "the lexer always
//! consumes at least one code point, falling back to `Unknown`" — every
//! lexical rule either matches or the dispatcher falls through to
//! [`crate::lexer::unknown`], so nothing at this layer ever needs to be
//! rolled back by `maybe`/`first`/`furthest`.

use thiserror::Error;

use crate::span::Span;

/// A fatal lexical error: an opening delimiter was never closed before
/// the stream ended.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unterminated string literal opened at {opened_at}")]
    UnterminatedString { opened_at: Span },

    #[error("unterminated block comment opened at {opened_at}")]
    UnterminatedBlockComment { opened_at: Span },

    #[error("unterminated template literal opened at {opened_at}")]
    UnterminatedTemplate { opened_at: Span },
}
