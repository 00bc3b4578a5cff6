//! Whitespace lexing (§4.3 rule 3).

use crate::codepoint::CodePoint;
use crate::engine::{consume_if, many, Engine};
use crate::failure::Failure;
use crate::lexer::error::LexError;
use crate::token::TokenKind;

/// Whether `c` is one of the ECMAScript whitespace code points (not
/// counting line terminators, which are their own token kind).
#[inline]
#[must_use]
pub fn is_whitespace(c: char) -> bool {
    matches!(
        c,
        '\u{0009}'
            | '\u{000B}'
            | '\u{000C}'
            | '\u{0020}'
            | '\u{00A0}'
            | '\u{FEFF}'
            | '\u{2000}'..='\u{200F}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{205F}'
            | '\u{3000}'
    )
}

/// Consumes one or more whitespace code points.
pub(crate) fn lex_whitespace(
    engine: &mut Engine<CodePoint>,
) -> Result<TokenKind, Failure<LexError>> {
    consume_if(
        engine,
        |cp: &CodePoint| is_whitespace(cp.value()),
        |_| unreachable!("dispatcher already checked is_whitespace"),
    )?;
    many(engine, |e| {
        consume_if(e, |cp: &CodePoint| is_whitespace(cp.value()), |_| {
            unreachable!("many() stops at the first non-matching item")
        })
    })?;
    Ok(TokenKind::Whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_space_and_tab_are_whitespace() {
        assert!(is_whitespace(' '));
        assert!(is_whitespace('\t'));
    }

    #[test]
    fn line_terminators_are_not_whitespace() {
        assert!(!is_whitespace('\n'));
        assert!(!is_whitespace('\r'));
        assert!(!is_whitespace('\u{2028}'));
    }

    #[test]
    fn bom_is_whitespace() {
        assert!(is_whitespace('\u{FEFF}'));
    }
}
