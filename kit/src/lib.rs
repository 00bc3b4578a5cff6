#![deny(
    unsafe_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]
//! The `esflow` facade: source-url resolution (§6) plus the synchronous
//! assembly of the byte/text → code-point → token → syntax-node pipeline
//! over [`esflow_core`]'s engine, lexer and parser.
//!
//! Everything here is a thin boundary utility — the actual lexical and
//! syntactic stages live in `esflow-core` and are unaware this crate
//! exists. `esflow-core`'s streaming realization (§12) is re-exported
//! unchanged for callers who want the incremental/async pipeline instead
//! of this crate's synchronous `parse_source`.

pub use esflow_core::*;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use esflow_core::codepoint::{CodePoint, CodePointStream};
use esflow_core::diagnostics::Diagnostic;
use esflow_core::engine::{Engine, Outcome};
use esflow_core::lexer::{next_token, LexError, LexerState};
use esflow_core::parser::{parse_statement, ParseContext, ParseError};
use esflow_core::span::SourceUrl;
use esflow_core::token::Token;

/// Resolves a caller-supplied string into a [`SourceUrl`] (§6).
///
/// - `/...` or `./...` → a `file://` URL, resolved against the current
///   working directory when relative.
/// - `scheme://...` with a syntactically valid scheme → parsed as a URL
///   verbatim.
/// - anything else → wrapped as a base64url-encoded
///   `data:application/javascript` URL, so no input string is ever
///   rejected by the resolver.
#[must_use]
pub fn resolve_source_url(input: &str) -> SourceUrl {
    if input.starts_with('/') || input.starts_with("./") {
        return SourceUrl::new(resolve_file_url(input));
    }
    if let Some(url) = parse_scheme_url(input) {
        return SourceUrl::new(url);
    }
    let encoded = URL_SAFE_NO_PAD.encode(input);
    SourceUrl::new(format!("data:application/javascript;base64,{encoded}"))
}

fn resolve_file_url(input: &str) -> String {
    if let Ok(url) = url::Url::from_file_path(input) {
        return url.into();
    }
    let cwd = std::env::current_dir().unwrap_or_default();
    match url::Url::from_file_path(cwd.join(input)) {
        Ok(url) => url.into(),
        Err(()) => format!("file://{input}"),
    }
}

fn parse_scheme_url(input: &str) -> Option<String> {
    let scheme_end = input.find("://")?;
    let scheme = &input[..scheme_end];
    if !is_valid_scheme(scheme) {
        return None;
    }
    url::Url::parse(input).ok().map(Into::into)
}

fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Runs the full synchronous pipeline (§6 "Byte source → text decoder →
/// code-point stream → token stream → node stream") over an
/// already-decoded `text` buffer, returning every top-level statement or
/// the first fatal diagnostic (§7: "the consumer sees at most one
/// terminal error per stream"), using the default [`config::ParseConfig`]
/// (§11).
pub fn parse_source(source: SourceUrl, text: &str) -> Result<Vec<ast::Statement>, Diagnostic> {
    parse_source_with_config(source, text, config::ParseConfig::new())
}

/// As [`parse_source`], but with a caller-supplied [`config::ParseConfig`]
/// (§11: "overridable by the embedding caller").
pub fn parse_source_with_config(
    source: SourceUrl,
    text: &str,
    config: config::ParseConfig,
) -> Result<Vec<ast::Statement>, Diagnostic> {
    let tokens = lex_all(source, text).map_err(|err| Diagnostic::from(&err))?;
    parse_all(tokens, config)
}

fn lex_all(source: SourceUrl, text: &str) -> Result<Vec<Token>, LexError> {
    let mut stream = CodePointStream::new(source);
    let mut engine: Engine<CodePoint> = Engine::new();
    engine.feed(stream.feed(text));
    engine.close();

    let mut state = LexerState::new();
    let mut tokens = Vec::new();
    loop {
        match engine.run_once(|e| next_token(e, &mut state)) {
            Outcome::Emitted(token) => tokens.push(token),
            Outcome::EndOfInput => break,
            Outcome::NeedMore => {
                unreachable!("a closed stream never reports NeedMore")
            }
            Outcome::Failed(err) => return Err(err),
            Outcome::Invariant(err) => {
                unreachable!("the lexical stage never violates an engine invariant: {err}")
            }
        }
    }
    Ok(tokens)
}

fn parse_all(
    tokens: Vec<Token>,
    config: config::ParseConfig,
) -> Result<Vec<ast::Statement>, Diagnostic> {
    let mut engine: Engine<Token> = Engine::new();
    engine.feed(tokens);
    engine.close();

    let mut ctx = ParseContext::new(config);
    let mut statements = Vec::new();
    loop {
        match engine.run_once(|e| parse_statement(e, &mut ctx)) {
            Outcome::Emitted(statement) => statements.push(statement),
            Outcome::EndOfInput => break,
            Outcome::NeedMore => {
                unreachable!("a closed stream never reports NeedMore")
            }
            Outcome::Failed(err) => return Err(Diagnostic::from(&err)),
            Outcome::Invariant(err) => {
                return Err(Diagnostic::from(&ParseError::Resource(err)));
            }
        }
    }
    Ok(statements)
}
