//! Line terminator lexing (§4.3 rule 5).
//!
//! CRLF is two consecutive line terminators per the character grammar,
//! but §4.3 asks for the token to "cover both contiguous terminators" —
//! so `\r\n` lexes as a single `LineTerminator` token, same as any other
//! run of terminator characters.

use crate::codepoint::CodePoint;
use crate::engine::{consume_if, many, Engine};
use crate::failure::Failure;
use crate::lexer::error::LexError;
use crate::token::TokenKind;

#[inline]
#[must_use]
pub fn is_line_terminator(c: char) -> bool {
    matches!(c, '\u{000A}' | '\u{000D}' | '\u{2028}' | '\u{2029}')
}

/// Consumes one or more contiguous line-terminator code points as a
/// single token.
pub(crate) fn lex_line_terminator(
    engine: &mut Engine<CodePoint>,
) -> Result<TokenKind, Failure<LexError>> {
    consume_if(
        engine,
        |cp: &CodePoint| is_line_terminator(cp.value()),
        |_| unreachable!("dispatcher already checked is_line_terminator"),
    )?;
    many(engine, |e| {
        consume_if(e, |cp: &CodePoint| is_line_terminator(cp.value()), |_| {
            unreachable!("many() stops at the first non-matching item")
        })
    })?;
    Ok(TokenKind::LineTerminator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codepoint::CodePointStream;
    use crate::engine::Outcome;
    use crate::span::SourceUrl;

    #[test]
    fn crlf_lexes_as_a_single_token() {
        let mut stream = CodePointStream::new(SourceUrl::anonymous());
        let mut engine = Engine::new();
        engine.feed(stream.feed("\r\nx"));
        engine.close();
        let outcome = engine.run_once(|e| {
            let kind = lex_line_terminator(e)?;
            Ok::<_, Failure<LexError>>((kind, e.consumed_slice().len()))
        });
        match outcome {
            Outcome::Emitted((kind, consumed)) => {
                assert_eq!(kind, TokenKind::LineTerminator);
                assert_eq!(consumed, 2);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
