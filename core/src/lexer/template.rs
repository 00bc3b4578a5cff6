//! Template literal lexing and its mode transitions (§4.3 "Mode
//! transitions for template literals").
//!
//! A template's body is lexed the same way whether it opens with a
//! backtick or resumes after a substitution's closing `}`: scan raw
//! characters (honoring backslash escapes, same as
//! [`crate::lexer::string`]) until either a closing backtick or a `${`
//! that starts another substitution.

use crate::codepoint::CodePoint;
use crate::engine::{consume, try_peek, Engine, Signal};
use crate::failure::Failure;
use crate::lexer::error::LexError;
use crate::span::Span;
use crate::token::TokenKind;

fn lex_template_body(
    engine: &mut Engine<CodePoint>,
    opened_at: Span,
    closing_kind: TokenKind,
    continuing_kind: TokenKind,
) -> Result<TokenKind, Failure<LexError>> {
    loop {
        let next = try_peek(engine)?.ok_or_else(|| {
            Failure::Fatal(LexError::UnterminatedTemplate {
                opened_at: opened_at.clone(),
            })
        })?;
        let c = next.value();

        if c == '`' {
            let _ = consume(engine, || unreachable!("try_peek just confirmed this"))?;
            return Ok(closing_kind);
        }

        if c == '\\' {
            let _ = consume(engine, || unreachable!("try_peek just confirmed this"))?;
            let _ = try_peek(engine)?.ok_or_else(|| {
                Failure::Fatal(LexError::UnterminatedTemplate {
                    opened_at: opened_at.clone(),
                })
            })?;
            let _ = consume(engine, || unreachable!("try_peek just confirmed this"))?;
            continue;
        }

        if c == '$' {
            match engine.peek_at(1) {
                Ok(cp) if cp.value() == '{' => {
                    let _ = consume(engine, || unreachable!("try_peek just confirmed this"))?;
                    let _ = consume(engine, || unreachable!("peek_at just confirmed this"))?;
                    return Ok(continuing_kind);
                }
                Err(Signal::NeedMore) => return Err(Failure::Incomplete),
                _ => {
                    let _ = consume(engine, || unreachable!("try_peek just confirmed this"))?;
                    continue;
                }
            }
        }

        let _ = consume(engine, || unreachable!("try_peek just confirmed this"))?;
    }
}

/// Consumes a template literal starting at a fresh backtick: either a
/// complete `Template` (no substitution) or a `TemplateHead` (the lexer
/// then enters template-gap mode, §4.3). Called only once the dispatcher
/// has confirmed the first code point is `` ` ``.
pub(crate) fn lex_open(engine: &mut Engine<CodePoint>) -> Result<TokenKind, Failure<LexError>> {
    let backtick = consume(engine, || {
        unreachable!("dispatcher already checked the leading backtick")
    })?;
    let opened_at = backtick.span().clone();
    lex_template_body(engine, opened_at, TokenKind::Template, TokenKind::TemplateHead)
}

/// Resumes a template from the `}` that closes a substitution: either a
/// `TemplateTail` (exits template-gap mode) or a `TemplateMiddle`
/// (re-enters it). Called only by [`crate::lexer`]'s top-level driver
/// when lexer state says the cursor is at such a `}`.
pub(crate) fn lex_continuation(
    engine: &mut Engine<CodePoint>,
) -> Result<TokenKind, Failure<LexError>> {
    let brace = consume(engine, || {
        unreachable!("caller already confirmed the leading '}' at depth 0")
    })?;
    let opened_at = brace.span().clone();
    lex_template_body(engine, opened_at, TokenKind::TemplateTail, TokenKind::TemplateMiddle)
}
