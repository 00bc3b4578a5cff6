//! The fallback rule (§4.3 rule 7): consumes exactly one code point and
//! tags it `Unknown`. Never raises — diagnostics over unknown input are
//! the syntactic stage's job, not the lexer's (§7).

use crate::codepoint::CodePoint;
use crate::engine::{consume, Engine};
use crate::failure::Failure;
use crate::lexer::error::LexError;
use crate::token::TokenKind;

pub(crate) fn lex_unknown(engine: &mut Engine<CodePoint>) -> Result<TokenKind, Failure<LexError>> {
    let _ = consume(engine, || {
        unreachable!("lex_unknown is only reached when a code point is available")
    })?;
    Ok(TokenKind::Unknown)
}
