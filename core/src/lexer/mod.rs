//! The lexical stage (§4.3): a dispatch coroutine over `CodePoint`s
//! producing `Token`s, driven by the same [`crate::engine::Engine`] that
//! drives the syntactic stage.

mod comment_or_div;
mod error;
mod identifier;
mod line_terminator;
mod number;
mod punctuator;
mod string;
mod template;
mod unknown;
mod whitespace;

pub use error::LexError;
pub use identifier::{is_identifier_part, is_identifier_start};
pub use line_terminator::is_line_terminator;
pub use punctuator::is_punctuator_start;
pub use whitespace::is_whitespace;

use crate::codepoint::CodePoint;
use crate::engine::Engine;
use crate::failure::Failure;
use crate::token::{Token, TokenKind};

/// Lexer-local state that outlives a single token: the template-gap
/// nesting stack (§4.3 "Mode transitions") and the contextual
/// `regex_allowed` flag (§4.3 "RegExp / division ambiguity", §9 Open
/// Question decision).
///
/// Neither field is part of the engine's own contract — the engine only
/// ever sees `CodePoint` in and `Token` out. This is exactly the
/// "engine-local lexer state" the specification calls for.
#[derive(Debug)]
pub struct LexerState {
    /// One entry per currently-open template substitution; the value is
    /// the brace-nesting depth reached inside that substitution (`{`
    /// increments, `}` decrements — until it would go below zero, which
    /// instead means "this is the substitution's own closing brace").
    template_depth: Vec<usize>,
    regex_allowed: bool,
}

impl Default for LexerState {
    fn default() -> Self {
        Self::new()
    }
}

impl LexerState {
    /// A fresh lexer state at the start of a source: regex literals are
    /// allowed before any token has been seen.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            template_depth: Vec::new(),
            regex_allowed: true,
        }
    }

    /// Whether a `/` encountered right now should be read as the start
    /// of a regex literal rather than a division operator. Not consulted
    /// by the lexer itself today (§9: no regex-literal production exists
    /// yet) — threaded through for a future `RegExpLiteral` production to
    /// read without re-plumbing the lexer.
    #[inline]
    #[must_use]
    pub const fn regex_allowed(&self) -> bool {
        self.regex_allowed
    }

    fn note_token(&mut self, token: &Token) {
        if token.kind().is_trivia() {
            return;
        }
        // A token that can end an expression (identifier, literal, `)`,
        // `]`) means the next `/` is division; anything else (operators,
        // `(`, `,`, keywords-to-be) leaves regex-literal position open.
        let ends_expression = token.kind().intersects(
            TokenKind::Identifier
                | TokenKind::Literal
                | TokenKind::Template
                | TokenKind::TemplateTail,
        ) || (token.kind() == TokenKind::Punctuator
            && matches!(token.payload(), ")" | "]"));
        self.regex_allowed = !ends_expression;
    }
}

/// Runs one full lexical-stage coroutine invocation: dispatches on the
/// first code point, drives the matching rule to completion, and
/// assembles the resulting `Token`'s payload and span from exactly what
/// was consumed.
pub fn next_token(
    engine: &mut Engine<CodePoint>,
    state: &mut LexerState,
) -> Result<Token, Failure<LexError>> {
    let kind = dispatch(engine, state)?;

    let consumed = engine.consumed_slice();
    let first = consumed
        .first()
        .unwrap_or_else(|| unreachable!("every dispatch rule consumes at least one code point"));
    let last = consumed
        .last()
        .unwrap_or_else(|| unreachable!("every dispatch rule consumes at least one code point"));
    let span = first.span().around(last.span());
    let payload: String = consumed.iter().map(CodePoint::value).collect();

    let token = Token::new(kind, payload, span);
    tracing::trace!(kind = ?token.kind(), span = %token.span(), "lexed token");
    state.note_token(&token);
    Ok(token)
}

fn dispatch(
    engine: &mut Engine<CodePoint>,
    state: &mut LexerState,
) -> Result<TokenKind, Failure<LexError>> {
    if matches!(state.template_depth.last(), Some(0)) && starts_with(engine, '}')? {
        let kind = template::lex_continuation(engine)?;
        state.template_depth.pop();
        if kind == TokenKind::TemplateMiddle {
            state.template_depth.push(0);
        }
        return Ok(kind);
    }

    let c = crate::engine::peek(engine, || {
        unreachable!("the engine only calls dispatch when an item is available")
    })?
    .value();

    let kind = match c {
        '"' | '\'' => string::lex_string(engine)?,
        '`' => {
            let kind = template::lex_open(engine)?;
            if kind == TokenKind::TemplateHead {
                state.template_depth.push(0);
            }
            kind
        }
        c if whitespace::is_whitespace(c) => whitespace::lex_whitespace(engine)?,
        c if line_terminator::is_line_terminator(c) => {
            line_terminator::lex_line_terminator(engine)?
        }
        '/' => comment_or_div::lex_comment_or_div(engine)?,
        c if identifier::is_identifier_start(c) => identifier::lex_identifier(engine)?,
        c if c.is_ascii_digit() => number::lex_number(engine)?,
        c if punctuator::is_punctuator_start(c) => {
            let kind = punctuator::lex_punctuator(engine)?;
            track_braces(engine, state);
            kind
        }
        _ => unknown::lex_unknown(engine)?,
    };

    Ok(kind)
}

fn starts_with(engine: &Engine<CodePoint>, expected: char) -> Result<bool, Failure<LexError>> {
    Ok(matches!(engine.peek(), Ok(cp) if cp.value() == expected))
}

fn track_braces(engine: &Engine<CodePoint>, state: &mut LexerState) {
    let Some(depth) = state.template_depth.last_mut() else {
        return;
    };
    match engine.consumed_slice().last().map(CodePoint::value) {
        Some('{') => *depth += 1,
        Some('}') => *depth = depth.saturating_sub(1),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codepoint::CodePointStream;
    use crate::engine::Outcome;
    use crate::span::SourceUrl;

    fn lex_all(text: &str) -> Vec<Token> {
        let mut stream = CodePointStream::new(SourceUrl::anonymous());
        let mut engine: Engine<CodePoint> = Engine::new();
        engine.feed(stream.feed(text));
        engine.close();
        let mut state = LexerState::new();
        let mut tokens = Vec::new();
        loop {
            match engine.run_once(|e| next_token(e, &mut state)) {
                Outcome::Emitted(token) => tokens.push(token),
                Outcome::EndOfInput => break,
                other => panic!("unexpected outcome while lexing {text:?}: {other:?}"),
            }
        }
        tokens
    }

    #[test]
    fn block_comment_then_identifier() {
        let tokens = lex_all("/* c */x");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind(), TokenKind::BlockComment);
        assert_eq!(tokens[1].kind(), TokenKind::Identifier);
        assert_eq!(tokens[1].payload(), "x");
    }

    #[test]
    fn member_call_expression_tokens() {
        let tokens: Vec<_> = lex_all(r#"console.log("hi")"#)
            .into_iter()
            .map(|t| (t.kind(), t.payload().to_owned()))
            .collect();
        assert_eq!(
            tokens,
            vec![
                (TokenKind::Identifier, "console".to_owned()),
                (TokenKind::Punctuator, ".".to_owned()),
                (TokenKind::Identifier, "log".to_owned()),
                (TokenKind::Punctuator, "(".to_owned()),
                (TokenKind::String, "\"hi\"".to_owned()),
                (TokenKind::Punctuator, ")".to_owned()),
            ]
        );
    }

    #[test]
    fn template_with_substitution_round_trips_as_three_tokens() {
        let tokens = lex_all("`a${x}b`");
        let kinds: Vec<_> = tokens.iter().map(Token::kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::TemplateHead,
                TokenKind::Identifier,
                TokenKind::TemplateTail,
            ]
        );
        let payloads: String = tokens.iter().map(|t| t.payload()).collect();
        assert_eq!(payloads, "`a${x}b`");
    }

    #[test]
    fn coverage_invariant_concatenated_payloads_equal_source() {
        for source in [
            "x;",
            "console.log(\"hi\")",
            "a.b.c",
            "f(a, b,)",
            "  // comment\n42 + 3.5",
        ] {
            let tokens = lex_all(source);
            let rebuilt: String = tokens.iter().map(|t| t.payload()).collect();
            assert_eq!(rebuilt, source, "coverage invariant failed for {source:?}");
        }
    }

    #[test]
    fn span_contiguity_invariant_holds_across_tokens() {
        let tokens = lex_all("console.log(\"hi\")");
        for pair in tokens.windows(2) {
            assert_eq!(pair[0].span().end(), pair[1].span().begin());
        }
    }

    #[test]
    fn idempotent_lexing_across_chunk_boundaries() {
        let whole = {
            let mut stream = CodePointStream::new(SourceUrl::anonymous());
            let mut engine: Engine<CodePoint> = Engine::new();
            engine.feed(stream.feed("console.log(\"hi\")"));
            engine.close();
            let mut state = LexerState::new();
            let mut tokens = Vec::new();
            loop {
                match engine.run_once(|e| next_token(e, &mut state)) {
                    Outcome::Emitted(token) => tokens.push(token),
                    Outcome::EndOfInput => break,
                    other => panic!("unexpected outcome: {other:?}"),
                }
            }
            tokens
        };

        let chunked = {
            let mut stream = CodePointStream::new(SourceUrl::anonymous());
            let mut engine: Engine<CodePoint> = Engine::new();
            for fragment in ["console", ".log(", "\"hi\")"] {
                engine.feed(stream.feed(fragment));
            }
            engine.close();
            let mut state = LexerState::new();
            let mut tokens = Vec::new();
            loop {
                match engine.run_once(|e| next_token(e, &mut state)) {
                    Outcome::Emitted(token) => tokens.push(token),
                    Outcome::EndOfInput => break,
                    Outcome::NeedMore => continue,
                    other => panic!("unexpected outcome: {other:?}"),
                }
            }
            tokens
        };

        assert_eq!(whole.len(), chunked.len());
        for (a, b) in whole.iter().zip(chunked.iter()) {
            assert_eq!(a.kind(), b.kind());
            assert_eq!(a.payload(), b.payload());
        }
    }

    #[test]
    fn span_length_invariant_matches_payload_code_point_count() {
        for source in [
            "x;",
            "console.log(\"hi\")",
            "/* block */a.b.c",
            "`a${x}b`",
            "  // trailing comment",
        ] {
            for token in lex_all(source) {
                let expected = token.payload().chars().count();
                let actual = token.span().end().position() - token.span().begin().position();
                assert_eq!(
                    actual,
                    expected,
                    "span length invariant failed for {:?} in {source:?}",
                    token.payload()
                );
            }
        }
    }
}
