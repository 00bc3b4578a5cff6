//! *Statement* productions (§4.4). Only `ExpressionStatement` exists in
//! the initial grammar subset; more variants register with
//! [`super::registry::statement_productions`] as the grammar grows.

use crate::ast::{ExpressionStatement, Statement};
use crate::engine::{maybe, Engine};
use crate::failure::Failure;
use crate::span::{Cursor, SourceUrl, Span};
use crate::token::{Token, TokenKind};

use super::context::ParseContext;
use super::error::ParseError;
use super::expression::{parse_expression, skip_trivia};

fn start_of_input() -> Span {
    Span::empty_at(Cursor::START, SourceUrl::anonymous())
}

fn expect_semicolon(
    engine: &mut Engine<Token>,
) -> Result<Option<Token>, Failure<ParseError>> {
    maybe(engine, |e| {
        crate::engine::consume_if(
            e,
            |t: &Token| t.kind() == TokenKind::Punctuator && t.payload() == ";",
            |_| unreachable!("maybe() only reports via Ok(None) on mismatch"),
        )
    })
}

/// *ExpressionStatement* = `Expression` + optional `;` (§4.4).
pub(crate) fn expression_statement(
    engine: &mut Engine<Token>,
    ctx: &mut ParseContext,
) -> Result<Statement, Failure<ParseError>> {
    skip_trivia(engine)?;
    let anchor = start_of_input();
    let expression = parse_expression(engine, ctx, &anchor)?;
    skip_trivia(engine)?;
    let semicolon = expect_semicolon(engine)?;
    Ok(Statement::Expression(ExpressionStatement::new(
        expression, semicolon,
    )))
}
