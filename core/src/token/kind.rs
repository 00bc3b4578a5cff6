//! `TokenKind`: a bitmask-capable tag over every lexical category (§3).

use bitflags::bitflags;

bitflags! {
    /// The category a [`super::Token`] belongs to.
    ///
    /// Kept as a bitmask (rather than a plain enum) so callers can match
    /// *groups* of kinds in one predicate — "any literal", "any
    /// comment" — the way a hand-rolled dispatch table over a plain enum
    /// would need a `matches!` arm per member instead of one constant.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TokenKind: u32 {
        /// The synthetic end-of-stream marker.
        const End             = 1 << 0;
        const Integer         = 1 << 1;
        const Float           = 1 << 2;
        const String          = 1 << 3;
        const Punctuator      = 1 << 4;
        const Identifier      = 1 << 5;
        const LineComment     = 1 << 6;
        const BlockComment    = 1 << 7;
        const Template        = 1 << 8;
        const TemplateHead    = 1 << 9;
        const TemplateMiddle  = 1 << 10;
        const TemplateTail    = 1 << 11;
        const RegExp          = 1 << 12;
        const LineTerminator  = 1 << 13;
        const Whitespace      = 1 << 14;
        const Unknown         = 1 << 15;

        /// `Integer | Float`.
        const Number  = Self::Integer.bits() | Self::Float.bits();
        /// `Number | String`.
        const Literal = Self::Number.bits() | Self::String.bits();
        /// `LineComment | BlockComment`.
        const Comment = Self::LineComment.bits() | Self::BlockComment.bits();
    }
}

impl TokenKind {
    /// Whether this kind (or set of kinds) is trivia that the syntactic
    /// stage skips before looking for a real production (§4.4
    /// "skip `Comment | Whitespace | LineTerminator`*").
    #[inline]
    #[must_use]
    pub fn is_trivia(self) -> bool {
        self.intersects(TokenKind::Comment | TokenKind::Whitespace | TokenKind::LineTerminator)
    }
}

impl core::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_is_union_of_integer_and_float() {
        assert!(TokenKind::Number.contains(TokenKind::Integer));
        assert!(TokenKind::Number.contains(TokenKind::Float));
        assert!(!TokenKind::Number.contains(TokenKind::String));
    }

    #[test]
    fn literal_includes_number_and_string() {
        assert!(TokenKind::Literal.contains(TokenKind::Integer));
        assert!(TokenKind::Literal.contains(TokenKind::String));
        assert!(!TokenKind::Literal.contains(TokenKind::Identifier));
    }

    #[test]
    fn comment_includes_both_comment_kinds() {
        assert!(TokenKind::Comment.contains(TokenKind::LineComment));
        assert!(TokenKind::Comment.contains(TokenKind::BlockComment));
    }

    #[test]
    fn trivia_matches_comment_whitespace_and_line_terminator_only() {
        assert!(TokenKind::LineComment.is_trivia());
        assert!(TokenKind::Whitespace.is_trivia());
        assert!(TokenKind::LineTerminator.is_trivia());
        assert!(!TokenKind::Identifier.is_trivia());
        assert!(!TokenKind::Punctuator.is_trivia());
    }
}
