//! `/`-prefixed lexing (§4.3 rule 6): line comments, block comments, and
//! the division punctuators. Regex-literal lexing is deliberately not
//! implemented here — see the §9 Open Question decision recorded in
//! [`crate::lexer`].

use crate::codepoint::CodePoint;
use crate::engine::{consume, try_peek, Engine};
use crate::failure::Failure;
use crate::lexer::error::LexError;
use crate::lexer::line_terminator::is_line_terminator;
use crate::token::TokenKind;

/// Consumes one of: a line comment, a block comment, `/=`, or `/`.
/// Called only once the dispatcher has confirmed the first code point is
/// `/`.
pub(crate) fn lex_comment_or_div(
    engine: &mut Engine<CodePoint>,
) -> Result<TokenKind, Failure<LexError>> {
    let slash = consume(engine, || {
        unreachable!("dispatcher already checked the leading '/'")
    })?;

    match try_peek(engine)? {
        Some(cp) if cp.value() == '/' => {
            let _ = consume(engine, || unreachable!("try_peek just confirmed this"))?;
            lex_line_comment_body(engine)
        }
        Some(cp) if cp.value() == '*' => {
            let _ = consume(engine, || unreachable!("try_peek just confirmed this"))?;
            let opened_at = slash.span().clone();
            lex_block_comment_body(engine, opened_at)
        }
        Some(cp) if cp.value() == '=' => {
            let _ = consume(engine, || unreachable!("try_peek just confirmed this"))?;
            Ok(TokenKind::Punctuator)
        }
        _ => Ok(TokenKind::Punctuator),
    }
}

fn lex_line_comment_body(
    engine: &mut Engine<CodePoint>,
) -> Result<TokenKind, Failure<LexError>> {
    loop {
        match try_peek(engine)? {
            None => return Ok(TokenKind::LineComment),
            Some(cp) if is_line_terminator(cp.value()) => return Ok(TokenKind::LineComment),
            Some(_) => {
                let _ = consume(engine, || unreachable!("try_peek just confirmed this"))?;
            }
        }
    }
}

fn lex_block_comment_body(
    engine: &mut Engine<CodePoint>,
    opened_at: crate::span::Span,
) -> Result<TokenKind, Failure<LexError>> {
    loop {
        let current = try_peek(engine)?.ok_or_else(|| {
            Failure::Fatal(LexError::UnterminatedBlockComment {
                opened_at: opened_at.clone(),
            })
        })?;

        if current.value() != '*' {
            let _ = consume(engine, || unreachable!("try_peek just confirmed this"))?;
            continue;
        }

        let _ = consume(engine, || unreachable!("try_peek just confirmed this"))?;
        match try_peek(engine)? {
            Some(cp) if cp.value() == '/' => {
                let _ = consume(engine, || unreachable!("try_peek just confirmed this"))?;
                return Ok(TokenKind::BlockComment);
            }
            Some(_) => continue,
            None => {
                return Err(Failure::Fatal(LexError::UnterminatedBlockComment {
                    opened_at,
                }))
            }
        }
    }
}
