//! *Expression* productions (§4.4): `PrimaryExpression` plus the
//! `MemberExpression`/`CallExpression` modifier loop.

use crate::ast::{CallArgument, CallExpression, Expression, Identifier, MemberExpression, StringLiteral};
use crate::engine::{consume_if, fatal, first, many, maybe, try_peek, Branch, Engine};
use crate::failure::Failure;
use crate::span::Span;
use crate::token::{Token, TokenKind};
use crate::traits::Diagnostic;

use super::context::ParseContext;
use super::error::ParseError;
use super::registry;

/// Skips `Comment | Whitespace | LineTerminator`* (§4.4).
pub(crate) fn skip_trivia(engine: &mut Engine<Token>) -> Result<(), Failure<ParseError>> {
    many(engine, |e| {
        consume_if(
            e,
            |t: &Token| t.kind().is_trivia(),
            |_| unreachable!("many() stops at the first non-matching item"),
        )
    })?;
    Ok(())
}

fn expect_kind(
    engine: &mut Engine<Token>,
    kind: TokenKind,
    expected: &'static str,
    anchor: &Span,
) -> Result<Token, Failure<ParseError>> {
    consume_if(
        engine,
        |t: &Token| t.kind() == kind,
        |found| match found {
            Some(t) => ParseError::Expected {
                expected,
                found: t.kind(),
                span: t.span().clone(),
            },
            None => ParseError::UnexpectedEof {
                expected,
                span: anchor.clone(),
            },
        },
    )
}

fn expect_punctuator(
    engine: &mut Engine<Token>,
    text: &'static str,
    anchor: &Span,
) -> Result<Token, Failure<ParseError>> {
    consume_if(
        engine,
        |t: &Token| t.kind() == TokenKind::Punctuator && t.payload() == text,
        |found| match found {
            Some(t) => ParseError::Expected {
                expected: text,
                found: t.kind(),
                span: t.span().clone(),
            },
            None => ParseError::UnexpectedEof {
                expected: text,
                span: anchor.clone(),
            },
        },
    )
}

fn parse_identifier(engine: &mut Engine<Token>, anchor: &Span) -> Result<Identifier, Failure<ParseError>> {
    let token = expect_kind(engine, TokenKind::Identifier, Identifier::fmt(), anchor)?;
    Ok(Identifier::new(token))
}

fn parse_string_literal(
    engine: &mut Engine<Token>,
    anchor: &Span,
) -> Result<StringLiteral, Failure<ParseError>> {
    let token = expect_kind(engine, TokenKind::String, StringLiteral::fmt(), anchor)?;
    Ok(StringLiteral::new(token))
}

/// *PrimaryExpression* = `Identifier | Literal` (§4.4). `Literal` is
/// `StringLiteral` only in the initial grammar subset.
pub(crate) fn parse_primary_expression(
    engine: &mut Engine<Token>,
    anchor: &Span,
) -> Result<Expression, Failure<ParseError>> {
    skip_trivia(engine)?;
    let branches: Vec<Branch<'_, Token, Expression, ParseError>> = vec![
        Box::new(|e| parse_identifier(e, anchor).map(Expression::Identifier)),
        Box::new(|e| parse_string_literal(e, anchor).map(Expression::StringLiteral)),
    ];
    first(engine, branches)
}

/// *MemberExpression* = `prev . Identifier` — `.` recoverable, identifier
/// fatal once the `.` is seen (§4.4).
pub(crate) fn member_expression_modifier(
    engine: &mut Engine<Token>,
    prev: Expression,
    _ctx: &mut ParseContext,
) -> Result<Expression, Failure<ParseError>> {
    skip_trivia(engine)?;
    let prev_span = prev.span();
    let dot = expect_punctuator(engine, ".", &prev_span)?;
    let dot_span = dot.span().clone();
    let property = fatal(engine, |e| {
        skip_trivia(e)?;
        parse_identifier(e, &dot_span)
    })?;
    Ok(Expression::Member(MemberExpression::new(prev, dot, property)))
}

/// *CallExpression* = `prev ( Argument,* )` — `(` recoverable, everything
/// after it fatal (§4.4). The argument list is the grammar's only
/// recursive production (§11), guarded by [`ParseContext::enter_recursive`].
pub(crate) fn call_expression_modifier(
    engine: &mut Engine<Token>,
    prev: Expression,
    ctx: &mut ParseContext,
) -> Result<Expression, Failure<ParseError>> {
    skip_trivia(engine)?;
    let prev_span = prev.span();
    let open_paren = expect_punctuator(engine, "(", &prev_span)?;
    let open_span = open_paren.span().clone();

    ctx.enter_recursive()?;
    let result = fatal(engine, |e| parse_arguments(e, ctx, &open_span));
    ctx.exit_recursive();
    let args = result?;

    let close_paren = fatal(engine, |e| {
        skip_trivia(e)?;
        expect_punctuator(e, ")", &open_span)
    })?;

    Ok(Expression::Call(CallExpression::new(
        prev, open_paren, args, close_paren,
    )))
}

/// *Argument,** — zero or more `Expression` + optional trailing `,`
/// (§4.4 "Argument"), stopping once `)` is next.
fn parse_arguments(
    engine: &mut Engine<Token>,
    ctx: &mut ParseContext,
    anchor: &Span,
) -> Result<Vec<CallArgument>, Failure<ParseError>> {
    let mut args = Vec::new();
    loop {
        skip_trivia(engine)?;
        if matches!(try_peek(engine)?, Some(t) if t.kind() == TokenKind::Punctuator && t.payload() == ")")
        {
            return Ok(args);
        }
        let expression = parse_expression(engine, ctx, anchor)?;
        skip_trivia(engine)?;
        let comma = maybe(engine, |e| expect_punctuator(e, ",", anchor))?;
        let had_comma = comma.is_some();
        args.push(CallArgument::new(expression, comma));
        if !had_comma {
            return Ok(args);
        }
    }
}

/// *Expression* = *PrimaryExpression* followed by zero or more modifiers,
/// left recursion flattened into a loop (§4.4).
pub fn parse_expression(
    engine: &mut Engine<Token>,
    ctx: &mut ParseContext,
    anchor: &Span,
) -> Result<Expression, Failure<ParseError>> {
    let mut expr = parse_primary_expression(engine, anchor)?;
    loop {
        let mut matched = None;
        for modifier in registry::expression_modifiers() {
            let candidate = expr.clone();
            if let Some(next) = maybe(engine, |e| modifier(e, candidate, ctx))? {
                matched = Some(next);
                break;
            }
        }
        match matched {
            Some(next) => expr = next,
            None => break,
        }
    }
    Ok(expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codepoint::{CodePoint, CodePointStream};
    use crate::engine::Outcome;
    use crate::lexer::{next_token, LexerState};
    use crate::span::{Cursor, SourceUrl};

    fn tokenize(source: &str) -> Vec<Token> {
        let mut stream = CodePointStream::new(SourceUrl::anonymous());
        let mut engine: Engine<CodePoint> = Engine::new();
        engine.feed(stream.feed(source));
        engine.close();
        let mut state = LexerState::new();
        let mut tokens = Vec::new();
        loop {
            match engine.run_once(|e| next_token(e, &mut state)) {
                Outcome::Emitted(t) if t.kind().is_trivia() => {}
                Outcome::Emitted(t) => tokens.push(t),
                Outcome::EndOfInput => break,
                other => panic!("unexpected lex outcome: {other:?}"),
            }
        }
        tokens
    }

    fn anchor() -> Span {
        Span::empty_at(Cursor::START, SourceUrl::anonymous())
    }

    #[test]
    fn parses_bare_identifier() {
        let tokens = tokenize("x");
        let mut engine: Engine<Token> = Engine::new();
        engine.feed(tokens);
        engine.close();
        let mut ctx = ParseContext::default();
        let anchor = anchor();
        let outcome = engine.run_once(|e| parse_expression(e, &mut ctx, &anchor));
        match outcome {
            Outcome::Emitted(Expression::Identifier(id)) => assert_eq!(id.name(), "x"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn parses_member_expression_chain() {
        let tokens = tokenize("a.b.c");
        let mut engine: Engine<Token> = Engine::new();
        engine.feed(tokens);
        engine.close();
        let mut ctx = ParseContext::default();
        let anchor = anchor();
        let outcome = engine.run_once(|e| parse_expression(e, &mut ctx, &anchor));
        match outcome {
            Outcome::Emitted(Expression::Member(outer)) => {
                assert_eq!(outer.property().name(), "c");
                match outer.object() {
                    Expression::Member(inner) => {
                        assert_eq!(inner.property().name(), "b");
                        match inner.object() {
                            Expression::Identifier(id) => assert_eq!(id.name(), "a"),
                            other => panic!("unexpected base: {other:?}"),
                        }
                    }
                    other => panic!("unexpected inner: {other:?}"),
                }
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn parses_call_expression_with_member_callee() {
        let tokens = tokenize("console.log(\"hi\")");
        let mut engine: Engine<Token> = Engine::new();
        engine.feed(tokens);
        engine.close();
        let mut ctx = ParseContext::default();
        let anchor = anchor();
        let outcome = engine.run_once(|e| parse_expression(e, &mut ctx, &anchor));
        match outcome {
            Outcome::Emitted(Expression::Call(call)) => {
                assert_eq!(call.args().len(), 1);
                match call.args()[0].expression() {
                    Expression::StringLiteral(lit) => assert_eq!(lit.raw(), "\"hi\""),
                    other => panic!("unexpected argument: {other:?}"),
                }
                match call.callee() {
                    Expression::Member(member) => assert_eq!(member.property().name(), "log"),
                    other => panic!("unexpected callee: {other:?}"),
                }
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn trailing_comma_is_accepted() {
        let tokens = tokenize("f(a, b,)");
        let mut engine: Engine<Token> = Engine::new();
        engine.feed(tokens);
        engine.close();
        let mut ctx = ParseContext::default();
        let anchor = anchor();
        let outcome = engine.run_once(|e| parse_expression(e, &mut ctx, &anchor));
        match outcome {
            Outcome::Emitted(Expression::Call(call)) => {
                assert_eq!(call.args().len(), 2);
                assert!(call.args()[0].comma().is_some());
                assert!(call.args()[1].comma().is_some());
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn unclosed_call_is_fatal_at_end_of_input() {
        let tokens = tokenize("f(a,");
        let mut engine: Engine<Token> = Engine::new();
        engine.feed(tokens);
        engine.close();
        let mut ctx = ParseContext::default();
        let anchor = anchor();
        let outcome = engine.run_once(|e| parse_expression(e, &mut ctx, &anchor));
        match outcome {
            Outcome::Failed(ParseError::UnexpectedEof { .. }) => {}
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
