//! Per-parse state threaded through every production (§11
//! "Configuration").

use crate::config::{ParseConfig, RecursionGuard};
use crate::failure::Failure;
use crate::EngineError;

use super::error::ParseError;

/// The resource-bound state a parse shares across every production
/// invocation: the configured limits plus the guard tracking how deep
/// the only recursive production (`CallExpression`'s argument list, §11)
/// currently is.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseContext {
    config: ParseConfig,
    guard: RecursionGuard,
}

impl ParseContext {
    #[must_use]
    pub fn new(config: ParseConfig) -> Self {
        Self {
            config,
            guard: RecursionGuard::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> ParseConfig {
        self.config
    }

    /// Enters a recursive production, failing fatally if the configured
    /// depth limit is exceeded (§4.2 "Resource bounds (ambient)": an
    /// engine-invariant failure, not a grammar-level recoverable one).
    pub fn enter_recursive(&mut self) -> Result<(), Failure<ParseError>> {
        self.guard
            .enter(self.config.max_recursion_depth)
            .map_err(|err| Failure::Fatal(ParseError::from(err)))
    }

    pub fn exit_recursive(&mut self) {
        self.guard.exit();
    }

    /// Fails fatally once the engine has committed more tokens than
    /// `ParseConfig::max_tokens` allows (§4.2 "Resource bounds (ambient)":
    /// an engine-invariant failure, not a grammar-level recoverable one).
    pub fn check_token_limit(&self, consumed_total: usize) -> Result<(), Failure<ParseError>> {
        if consumed_total > self.config.max_tokens {
            return Err(Failure::Fatal(ParseError::from(
                EngineError::TokenLimitExceeded {
                    consumed: consumed_total,
                    limit: self.config.max_tokens,
                },
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recursion_limit_raises_fatal_resource_error() {
        let config = ParseConfig::new().with_max_recursion_depth(2);
        let mut ctx = ParseContext::new(config);
        ctx.enter_recursive().unwrap();
        ctx.enter_recursive().unwrap();
        let err = ctx.enter_recursive().unwrap_err();
        assert!(matches!(err, Failure::Fatal(ParseError::Resource(_))));
    }

    #[test]
    fn exit_recursive_allows_reentry() {
        let config = ParseConfig::new().with_max_recursion_depth(1);
        let mut ctx = ParseContext::new(config);
        ctx.enter_recursive().unwrap();
        ctx.exit_recursive();
        ctx.enter_recursive().unwrap();
    }

    #[test]
    fn token_limit_raises_fatal_resource_error_once_exceeded() {
        let config = ParseConfig::new().with_max_tokens(10);
        let ctx = ParseContext::new(config);
        ctx.check_token_limit(10).unwrap();
        let err = ctx.check_token_limit(11).unwrap_err();
        assert!(matches!(err, Failure::Fatal(ParseError::Resource(_))));
    }
}
