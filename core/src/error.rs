//! Engine-invariant errors (§7 "Engine invariant").
//!
//! [`EngineError`] is distinct from the lexical and syntactic error
//! taxonomies ([`crate::lexer::LexError`], [`crate::parser::ParseError`]):
//! it signals a violation of the engine's own contract rather than
//! something a grammar author can provoke by writing an unusual
//! production. An [`EngineError`] always aborts the pipeline — nothing
//! downstream catches it.

use core::fmt;

/// An error raised by the parser engine itself rather than by a
/// particular lexical or syntactic rule.
///
/// User-defined error types integrate with these by implementing
/// `From<EngineError>`.
///
/// # Example
///
/// ```ignore
/// use thiserror::Error;
///
/// #[derive(Error, Debug)]
/// pub enum MyParseError {
///     #[error("recursion limit exceeded at depth {depth}")]
///     TooDeep { depth: usize },
/// }
///
/// impl From<esflow_core::EngineError> for MyParseError {
///     fn from(err: esflow_core::EngineError) -> Self {
///         match err {
///             esflow_core::EngineError::RecursionLimitExceeded { depth, .. } => {
///                 MyParseError::TooDeep { depth }
///             }
///             _ => unreachable!(),
///         }
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// A coroutine emitted without consuming any input (§4.2 step 2: "a
    /// production that emits without consuming would loop forever").
    CommitWithoutProgress,

    /// A token stream was not fully consumed after parsing finished,
    /// i.e. trailing, non-trivia tokens remain past the last accepted
    /// statement.
    StreamNotConsumed {
        /// Number of remaining tokens (excluding whitespace).
        remaining: usize,
    },

    /// [`crate::config::RecursionGuard`] rejected a nested descent.
    ///
    /// # Example
    ///
    /// Input like `f(f(f(f(f(...)))))` nested past the configured limit
    /// triggers this error rather than overflowing the call stack.
    RecursionLimitExceeded {
        /// Current recursion depth when the limit was exceeded.
        depth: usize,
        /// Maximum allowed recursion depth.
        limit: usize,
    },

    /// An engine instance consumed more tokens than
    /// `ParseConfig::max_tokens` allows.
    TokenLimitExceeded {
        /// Number of tokens consumed when the limit was exceeded.
        consumed: usize,
        /// Maximum allowed token count.
        limit: usize,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::CommitWithoutProgress => {
                write!(f, "parser committed without consuming any input")
            }
            EngineError::StreamNotConsumed { remaining } => {
                write!(
                    f,
                    "stream not fully consumed: {} tokens remaining",
                    remaining
                )
            }
            EngineError::RecursionLimitExceeded { depth, limit } => {
                write!(
                    f,
                    "recursion limit exceeded: depth {} > limit {}",
                    depth, limit
                )
            }
            EngineError::TokenLimitExceeded { consumed, limit } => {
                write!(
                    f,
                    "token limit exceeded: consumed {} > limit {}",
                    consumed, limit
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EngineError {}
