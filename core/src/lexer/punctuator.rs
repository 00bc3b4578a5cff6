//! Punctuator lexing (§4.3 rule 2): a hand-rolled maximal-munch decision
//! tree over `{ } ( ) [ ] . ; , ~ ? : < <= << <<= > >= >> >>= >>> >>>=
//! = == === ! != !== + ++ += - -- -= * *= % %= & && &= | || |= ^ ^=`.
//!
//! `/`, `/=`, and the two comment forms share a first code point with
//! this alphabet but are carved out entirely into
//! [`crate::lexer::comment_or_div`] (§4.3 rule 6) — this module never
//! sees a leading `/`.

use crate::codepoint::CodePoint;
use crate::engine::{consume, try_peek, Engine};
use crate::failure::Failure;
use crate::lexer::error::LexError;
use crate::token::TokenKind;

/// Whether `c` can open a punctuator handled by this module (everything
/// in the alphabet except `/`, which belongs to
/// [`crate::lexer::comment_or_div`]).
#[inline]
#[must_use]
pub fn is_punctuator_start(c: char) -> bool {
    matches!(
        c,
        '{' | '}'
            | '('
            | ')'
            | '['
            | ']'
            | '.'
            | ';'
            | ','
            | '~'
            | '?'
            | ':'
            | '<'
            | '>'
            | '='
            | '!'
            | '+'
            | '-'
            | '*'
            | '%'
            | '&'
            | '|'
            | '^'
    )
}

fn try_consume_char(
    engine: &mut Engine<CodePoint>,
    expected: char,
) -> Result<bool, Failure<LexError>> {
    match try_peek(engine)? {
        Some(cp) if cp.value() == expected => {
            let _ = consume(engine, || {
                unreachable!("try_peek just confirmed this code point exists")
            })?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

/// Consumes the longest valid punctuator starting at the cursor. Called
/// only once the dispatcher has confirmed the first code point
/// satisfies [`is_punctuator_start`].
pub(crate) fn lex_punctuator(
    engine: &mut Engine<CodePoint>,
) -> Result<TokenKind, Failure<LexError>> {
    let first = consume(engine, || {
        unreachable!("dispatcher already checked is_punctuator_start")
    })?
    .value();

    match first {
        // No extended forms in this grammar subset's alphabet.
        '{' | '}' | '(' | ')' | '[' | ']' | '.' | ';' | ',' | '~' | '?' | ':' => {}

        '<' => {
            if try_consume_char(engine, '<')? {
                let _ = try_consume_char(engine, '=')?; // <<=, <<
            } else {
                let _ = try_consume_char(engine, '=')?; // <=, <
            }
        }
        '>' => {
            if try_consume_char(engine, '>')? {
                if try_consume_char(engine, '>')? {
                    let _ = try_consume_char(engine, '=')?; // >>>=, >>>
                } else {
                    let _ = try_consume_char(engine, '=')?; // >>=, >>
                }
            } else {
                let _ = try_consume_char(engine, '=')?; // >=, >
            }
        }
        '=' => {
            if try_consume_char(engine, '=')? {
                let _ = try_consume_char(engine, '=')?; // ===, ==
            }
        }
        '!' => {
            if try_consume_char(engine, '=')? {
                let _ = try_consume_char(engine, '=')?; // !==, !=
            }
        }
        '+' => {
            if !try_consume_char(engine, '+')? {
                let _ = try_consume_char(engine, '=')?; // +=, +
            }
        }
        '-' => {
            if !try_consume_char(engine, '-')? {
                let _ = try_consume_char(engine, '=')?; // -=, -
            }
        }
        '*' => {
            let _ = try_consume_char(engine, '=')?; // *=, *
        }
        '%' => {
            let _ = try_consume_char(engine, '=')?; // %=, %
        }
        '&' => {
            if !try_consume_char(engine, '&')? {
                let _ = try_consume_char(engine, '=')?; // &=, &
            }
        }
        '|' => {
            if !try_consume_char(engine, '|')? {
                let _ = try_consume_char(engine, '=')?; // |=, |
            }
        }
        '^' => {
            let _ = try_consume_char(engine, '=')?; // ^=, ^
        }
        _ => unreachable!("is_punctuator_start guards every reachable first character"),
    }

    Ok(TokenKind::Punctuator)
}
