//! The syntactic stage (§4.4): a dispatch coroutine over `Token`s
//! producing `Statement`s, driven by the same [`crate::engine::Engine`]
//! that drives the lexical stage.

mod context;
mod error;
mod expression;
mod registry;
mod statement;

pub use context::ParseContext;
pub use error::ParseError;
pub use expression::parse_expression;

use crate::ast::Statement;
use crate::engine::Engine;
use crate::failure::Failure;
use crate::token::Token;

/// Runs one full syntactic-stage coroutine invocation: consults
/// `Statement`'s variant registry and emits exactly one top-level
/// statement (§4.4 "each invocation ... emits exactly one statement").
///
/// This mirrors [`crate::engine::first`]'s furthest-failure-on-all-fail
/// contract by hand rather than reusing it directly: every registered
/// [`registry::StatementFn`] threads the same `&mut ParseContext`, which
/// `first`'s boxed-closure branches can't share across alternatives
/// without aliasing it.
pub fn parse_statement(
    engine: &mut Engine<Token>,
    ctx: &mut ParseContext,
) -> Result<Statement, Failure<ParseError>> {
    ctx.check_token_limit(engine.consumed_total())?;
    let start = engine.position();
    let mut furthest_failure: Option<(usize, Failure<ParseError>)> = None;
    for production in registry::statement_productions() {
        engine.set_position(start);
        match production(engine, ctx) {
            Ok(value) => {
                tracing::debug!(span = %value.span(), "parsed statement");
                return Ok(value);
            }
            Err(Failure::Incomplete) => return Err(Failure::Incomplete),
            Err(failure @ Failure::Fatal(_)) => return Err(failure),
            Err(failure @ Failure::Recoverable(_)) => {
                let reached = engine.position();
                let replace = furthest_failure
                    .as_ref()
                    .is_none_or(|(best, _)| reached > *best);
                if replace {
                    furthest_failure = Some((reached, failure));
                }
            }
        }
    }
    engine.set_position(start);
    Err(furthest_failure
        .map(|(_, failure)| failure)
        .unwrap_or(Failure::Incomplete))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codepoint::{CodePoint, CodePointStream};
    use crate::engine::Outcome;
    use crate::lexer::{next_token, LexerState};
    use crate::span::SourceUrl;

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

    #[test]
    fn parses_a_full_statement_end_to_end() {
        let tokens = tokenize("console.log(\"hi\");");
        let mut engine: Engine<Token> = Engine::new();
        engine.feed(tokens);
        engine.close();
        let mut ctx = ParseContext::default();
        match engine.run_once(|e| parse_statement(e, &mut ctx)) {
            Outcome::Emitted(Statement::Expression(stmt)) => {
                assert!(stmt.semicolon().is_some());
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn truncated_call_is_a_fatal_failure_not_a_silent_hang() {
        let tokens = tokenize("f(a,");
        let mut engine: Engine<Token> = Engine::new();
        engine.feed(tokens);
        engine.close();
        let mut ctx = ParseContext::default();
        match engine.run_once(|e| parse_statement(e, &mut ctx)) {
            Outcome::Failed(ParseError::UnexpectedEof { .. }) => {}
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn exceeding_max_tokens_raises_a_fatal_resource_error() {
        use crate::config::ParseConfig;
        use crate::EngineError;

        let tokens = tokenize("console.log(\"hi\");");
        let mut engine: Engine<Token> = Engine::new();
        engine.feed(tokens);
        engine.close();
        let mut ctx = ParseContext::new(ParseConfig::new().with_max_tokens(0));
        match engine.run_once(|e| parse_statement(e, &mut ctx)) {
            Outcome::Failed(ParseError::Resource(EngineError::TokenLimitExceeded {
                limit: 0,
                ..
            })) => {}
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
