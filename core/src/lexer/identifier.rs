//! Identifier lexing (§4.3 rule 4): `[$_ L]` then `[$_ L Mn Mc Nd Pc ZWNJ ZWJ]*`.

use unicode_categories::UnicodeCategories;

use crate::codepoint::CodePoint;
use crate::engine::{consume_if, many, Engine};
use crate::failure::Failure;
use crate::lexer::error::LexError;
use crate::token::TokenKind;

const ZWNJ: char = '\u{200C}';
const ZWJ: char = '\u{200D}';

/// Whether `c` can open an identifier: `$`, `_`, or a Unicode letter (`L`).
///
/// Per the §9 Open Question decision, a leading `\` (the start of a
/// `\uXXXX` unicode escape) is deliberately *not* accepted here — it
/// falls through to [`crate::lexer::unknown`] instead of being silently
/// absorbed.
#[inline]
#[must_use]
pub fn is_identifier_start(c: char) -> bool {
    c == '$' || c == '_' || c.is_letter()
}

/// Whether `c` can continue an identifier after its first character:
/// everything `is_identifier_start` accepts, plus the combining-mark,
/// decimal-digit, and connector-punctuation categories, plus the two
/// zero-width joiner characters.
#[inline]
#[must_use]
pub fn is_identifier_part(c: char) -> bool {
    is_identifier_start(c)
        || c.is_mark_nonspacing()
        || c.is_mark_spacing_combining()
        || c.is_number_decimal_digit()
        || c.is_punctuation_connector()
        || c == ZWNJ
        || c == ZWJ
}

/// Consumes `[$_ L][$_ L Mn Mc Nd Pc ZWNJ ZWJ]*`. Called only once the
/// dispatcher has already confirmed the first code point satisfies
/// [`is_identifier_start`].
pub(crate) fn lex_identifier(
    engine: &mut Engine<CodePoint>,
) -> Result<TokenKind, Failure<LexError>> {
    consume_if(
        engine,
        |cp: &CodePoint| is_identifier_start(cp.value()),
        |_| unreachable!("dispatcher already checked is_identifier_start"),
    )?;
    many(engine, |e| {
        consume_if(e, |cp: &CodePoint| is_identifier_part(cp.value()), |_| {
            unreachable!("many() stops at the first non-matching item")
        })
    })?;
    Ok(TokenKind::Identifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::SourceUrl;

    fn engine_for(text: &str) -> Engine<CodePoint> {
        let mut stream = crate::codepoint::CodePointStream::new(SourceUrl::anonymous());
        let mut engine = Engine::new();
        engine.feed(stream.feed(text));
        engine.close();
        engine
    }

    #[test]
    fn plain_ascii_identifier() {
        let mut engine = engine_for("foo_Bar$1");
        let outcome = engine.run_once(|e| {
            let kind = lex_identifier(e)?;
            let consumed = e.consumed_slice();
            let payload: String = consumed.iter().map(CodePoint::value).collect();
            Ok::<_, Failure<LexError>>((kind, payload))
        });
        match outcome {
            crate::engine::Outcome::Emitted((kind, payload)) => {
                assert_eq!(kind, TokenKind::Identifier);
                assert_eq!(payload, "foo_Bar$1");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn dollar_and_underscore_alone_are_identifiers() {
        assert!(is_identifier_start('$'));
        assert!(is_identifier_start('_'));
        assert!(!is_identifier_start('1'));
    }

    #[test]
    fn leading_backslash_is_rejected() {
        assert!(!is_identifier_start('\\'));
    }

    #[test]
    fn combining_mark_continues_but_does_not_start() {
        // U+0301 COMBINING ACUTE ACCENT: Mn, valid continuation, invalid start.
        let mark = '\u{0301}';
        assert!(!is_identifier_start(mark));
        assert!(is_identifier_part(mark));
    }

    #[test]
    fn zero_width_joiners_continue_identifiers() {
        assert!(is_identifier_part(ZWNJ));
        assert!(is_identifier_part(ZWJ));
    }
}
