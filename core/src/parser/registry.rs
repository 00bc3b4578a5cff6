//! Self-registration without inheritance (§9 "Class hierarchy with
//! self-registration"): a process-wide, read-only-after-init mapping
//! from abstract production to its concrete alternatives, built once
//! behind a [`std::sync::OnceLock`].

use std::sync::OnceLock;

use crate::ast::{Expression, Statement};
use crate::engine::Engine;
use crate::failure::Failure;
use crate::token::Token;

use super::context::ParseContext;
use super::error::ParseError;
use super::expression;
use super::statement;

/// An `Expression` modifier: given the expression parsed so far, tries to
/// extend it (`. Identifier`, `( Argument,* )`) and either returns the
/// wrapped expression or recoverably declines.
pub type ModifierFn =
    fn(&mut Engine<Token>, Expression, &mut ParseContext) -> Result<Expression, Failure<ParseError>>;

/// A concrete `Statement` variant's parse function.
pub type StatementFn =
    fn(&mut Engine<Token>, &mut ParseContext) -> Result<Statement, Failure<ParseError>>;

static EXPRESSION_MODIFIERS: OnceLock<Vec<ModifierFn>> = OnceLock::new();
static STATEMENT_PRODUCTIONS: OnceLock<Vec<StatementFn>> = OnceLock::new();

/// `Expression`'s modifier registry, in the order `first`/`furthest`
/// tries them: `MemberExpression` before `CallExpression` (§4.4 lists
/// them in this order; both are mutually exclusive on their first token
/// so order has no grammar effect, only diagnostic-ordering effect).
pub fn expression_modifiers() -> &'static [ModifierFn] {
    EXPRESSION_MODIFIERS.get_or_init(|| {
        vec![
            expression::member_expression_modifier,
            expression::call_expression_modifier,
        ]
    })
}

/// `Statement`'s variant registry. Only `ExpressionStatement` exists in
/// the initial grammar subset (§4.4); more variants register here as the
/// grammar grows.
pub fn statement_productions() -> &'static [StatementFn] {
    STATEMENT_PRODUCTIONS.get_or_init(|| vec![statement::expression_statement])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registries_are_populated_and_stable_across_calls() {
        assert_eq!(expression_modifiers().len(), 2);
        assert_eq!(statement_productions().len(), 1);
        let first_call = expression_modifiers().as_ptr();
        let second_call = expression_modifiers().as_ptr();
        assert_eq!(first_call, second_call);
    }
}
