#![deny(
    unsafe_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

pub mod ast;
pub mod codepoint;
pub mod config;
pub mod diagnostics;
pub mod engine;
mod error;
mod failure;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod token;
pub mod traits;

#[cfg(any(feature = "tokio", feature = "futures"))]
pub mod async_stream;

pub use codepoint::{CodePoint, CodePointStream};
pub use config::{ParseConfig, RecursionGuard};
pub use engine::{Engine, Outcome, Signal};
pub use error::EngineError;
pub use failure::Failure;
pub use lexer::{next_token, LexError, LexerState};
pub use parser::{parse_expression, parse_statement, ParseContext, ParseError};
pub use span::{Cursor, SourceUrl, Span};
pub use token::{Token, TokenKind};
pub use traits::Diagnostic;
