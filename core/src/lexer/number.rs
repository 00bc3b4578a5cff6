//! Number literal lexing (§4.3, §9 Open Question decision).
//!
//! Only decimal integers and simple decimals (`digits` or
//! `digits.digits`) are recognized. Exponents (`1e10`), radix prefixes
//! (`0x`, `0o`, `0b`), `BigInt` suffixes (`10n`), and numeric separators
//! (`1_000`) are unimplemented — the full ECMAScript numeric grammar is
//! explicitly future work (§9).

use crate::codepoint::CodePoint;
use crate::engine::{consume, consume_if, many, try_peek, Engine, Signal};
use crate::failure::Failure;
use crate::lexer::error::LexError;
use crate::token::TokenKind;

fn digits(engine: &mut Engine<CodePoint>) -> Result<(), Failure<LexError>> {
    many(engine, |e| {
        consume_if(e, |cp: &CodePoint| cp.value().is_ascii_digit(), |_| {
            unreachable!("many() stops at the first non-matching item")
        })
    })?;
    Ok(())
}

/// Consumes `[0-9]+` optionally followed by `.[0-9]+`, tagging the result
/// `Integer` or `Float` accordingly. Called only once the dispatcher has
/// confirmed the first code point is an ASCII digit.
///
/// A `.` not followed by a digit (`3.`, or `3` at end of stream) is left
/// unconsumed: it is re-lexed as its own `.` punctuator on the next
/// dispatch rather than absorbed into the number.
pub(crate) fn lex_number(engine: &mut Engine<CodePoint>) -> Result<TokenKind, Failure<LexError>> {
    consume_if(
        engine,
        |cp: &CodePoint| cp.value().is_ascii_digit(),
        |_| unreachable!("dispatcher already checked the leading digit"),
    )?;
    digits(engine)?;

    let dot_next = matches!(try_peek(engine)?, Some(cp) if cp.value() == '.');
    if !dot_next {
        return Ok(TokenKind::Integer);
    }

    match engine.peek_at(1) {
        Ok(cp) if cp.value().is_ascii_digit() => {
            let _ = consume(engine, || unreachable!("just confirmed the '.' exists"))?;
            digits(engine)?;
            Ok(TokenKind::Float)
        }
        Ok(_) | Err(Signal::EndOfStream) => Ok(TokenKind::Integer),
        Err(Signal::NeedMore) => Err(Failure::Incomplete),
    }
}
