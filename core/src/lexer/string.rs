//! String literal lexing (§4.3 rule 1).

use crate::codepoint::CodePoint;
use crate::engine::{consume, try_peek, Engine};
use crate::failure::Failure;
use crate::lexer::error::LexError;
use crate::token::TokenKind;

/// Consumes a string literal. Called only once the dispatcher has
/// confirmed the first code point is `"` or `'`.
///
/// Backslash escapes whatever code point follows it, including another
/// backslash or the quote character itself — the lexer does not
/// interpret escapes, it only refuses to let them terminate the string
/// early (§8 "payload reproduces the source exactly" means escapes stay
/// literal in `payload`).
pub(crate) fn lex_string(engine: &mut Engine<CodePoint>) -> Result<TokenKind, Failure<LexError>> {
    let opening = consume(engine, || {
        unreachable!("dispatcher already checked the opening quote")
    })?;
    let quote = opening.value();
    let opened_at = opening.span().clone();

    loop {
        let next = try_peek(engine)?.ok_or_else(|| {
            Failure::Fatal(LexError::UnterminatedString {
                opened_at: opened_at.clone(),
            })
        })?;
        let c = next.value();

        if c == quote {
            let _ = consume(engine, || {
                unreachable!("try_peek just confirmed this code point exists")
            })?;
            return Ok(TokenKind::String);
        }

        if is_line_terminator(c) {
            return Err(Failure::Fatal(LexError::UnterminatedString { opened_at }));
        }

        if c == '\\' {
            let _ = consume(engine, || {
                unreachable!("try_peek just confirmed this code point exists")
            })?;
            // The escaped code point: any code point may follow, including
            // another backslash, the quote, or a line terminator (which
            // becomes a line continuation rather than ending the literal).
            let _ = try_peek(engine)?.ok_or_else(|| {
                Failure::Fatal(LexError::UnterminatedString {
                    opened_at: opened_at.clone(),
                })
            })?;
            let _ = consume(engine, || {
                unreachable!("try_peek just confirmed this code point exists")
            })?;
            continue;
        }

        let _ = consume(engine, || {
            unreachable!("try_peek just confirmed this code point exists")
        })?;
    }
}

fn is_line_terminator(c: char) -> bool {
    super::line_terminator::is_line_terminator(c)
}
