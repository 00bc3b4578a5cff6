//! Syntax tree nodes (§3 "Syntax node", §4.4 grammar).
//!
//! Every node retains the tokens it consumed so its span can be derived
//! (`around` of the first and last token, §3 invariant) and so a later
//! printer could round-trip it without re-lexing.

use crate::span::Span;
use crate::token::Token;
use crate::traits::Diagnostic;

/// `Identifier` — a single `Identifier` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    token: Token,
}

impl Identifier {
    #[must_use]
    pub fn new(token: Token) -> Self {
        Self { token }
    }

    /// The identifier's text, e.g. `console`.
    #[must_use]
    pub fn name(&self) -> &str {
        self.token.payload()
    }

    #[must_use]
    pub fn span(&self) -> &Span {
        self.token.span()
    }

    #[must_use]
    pub fn token(&self) -> &Token {
        &self.token
    }
}

impl Diagnostic for Identifier {
    fn fmt() -> &'static str {
        "identifier"
    }
}

/// `StringLiteral` — a single `String` token, payload including its
/// surrounding quotes (§8 "Lexical unit tests").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLiteral {
    token: Token,
}

impl StringLiteral {
    #[must_use]
    pub fn new(token: Token) -> Self {
        Self { token }
    }

    /// The literal's raw payload, quotes included.
    #[must_use]
    pub fn raw(&self) -> &str {
        self.token.payload()
    }

    #[must_use]
    pub fn span(&self) -> &Span {
        self.token.span()
    }

    #[must_use]
    pub fn token(&self) -> &Token {
        &self.token
    }
}

impl Diagnostic for StringLiteral {
    fn fmt() -> &'static str {
        "string literal"
    }
}

/// `MemberExpression(object, property)` — `prev . Identifier` (§4.4).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberExpression {
    object: Box<Expression>,
    dot: Token,
    property: Identifier,
}

impl MemberExpression {
    #[must_use]
    pub fn new(object: Expression, dot: Token, property: Identifier) -> Self {
        Self {
            object: Box::new(object),
            dot,
            property,
        }
    }

    #[must_use]
    pub fn object(&self) -> &Expression {
        &self.object
    }

    #[must_use]
    pub fn dot(&self) -> &Token {
        &self.dot
    }

    #[must_use]
    pub fn property(&self) -> &Identifier {
        &self.property
    }

    #[must_use]
    pub fn span(&self) -> Span {
        self.object.span().around(self.property.span())
    }
}

/// `CallArgument(expression, optComma)` — an `Expression` followed by an
/// optional trailing comma (§4.4 "Argument").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallArgument {
    expression: Expression,
    comma: Option<Token>,
}

impl CallArgument {
    #[must_use]
    pub fn new(expression: Expression, comma: Option<Token>) -> Self {
        Self { expression, comma }
    }

    #[must_use]
    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    #[must_use]
    pub fn comma(&self) -> Option<&Token> {
        self.comma.as_ref()
    }

    #[must_use]
    pub fn span(&self) -> Span {
        match &self.comma {
            Some(comma) => self.expression.span().around(comma.span()),
            None => self.expression.span(),
        }
    }
}

/// `CallExpression(callee, openParen, args, closeParen)` — `prev (
/// Argument,* )` (§4.4).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallExpression {
    callee: Box<Expression>,
    open_paren: Token,
    args: Vec<CallArgument>,
    close_paren: Token,
}

impl CallExpression {
    #[must_use]
    pub fn new(
        callee: Expression,
        open_paren: Token,
        args: Vec<CallArgument>,
        close_paren: Token,
    ) -> Self {
        Self {
            callee: Box::new(callee),
            open_paren,
            args,
            close_paren,
        }
    }

    #[must_use]
    pub fn callee(&self) -> &Expression {
        &self.callee
    }

    #[must_use]
    pub fn open_paren(&self) -> &Token {
        &self.open_paren
    }

    #[must_use]
    pub fn args(&self) -> &[CallArgument] {
        &self.args
    }

    #[must_use]
    pub fn close_paren(&self) -> &Token {
        &self.close_paren
    }

    #[must_use]
    pub fn span(&self) -> Span {
        self.callee.span().around(self.close_paren.span())
    }
}

/// `PrimaryExpression | modifier*` flattened into one tagged variant
/// (§4.4 "left-recursion flattened into a loop").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Identifier(Identifier),
    StringLiteral(StringLiteral),
    Member(MemberExpression),
    Call(CallExpression),
}

impl Expression {
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Identifier(node) => node.span().clone(),
            Self::StringLiteral(node) => node.span().clone(),
            Self::Member(node) => node.span(),
            Self::Call(node) => node.span(),
        }
    }
}

/// `ExpressionStatement(expression, optSemicolon)` — the only statement
/// production in the initial grammar subset (§4.4).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionStatement {
    expression: Expression,
    semicolon: Option<Token>,
}

impl ExpressionStatement {
    #[must_use]
    pub fn new(expression: Expression, semicolon: Option<Token>) -> Self {
        Self {
            expression,
            semicolon,
        }
    }

    #[must_use]
    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    #[must_use]
    pub fn semicolon(&self) -> Option<&Token> {
        self.semicolon.as_ref()
    }

    #[must_use]
    pub fn span(&self) -> Span {
        match &self.semicolon {
            Some(semi) => self.expression.span().around(semi.span()),
            None => self.expression.span(),
        }
    }
}

/// The top-level node the syntactic stage emits one of per invocation
/// (§4.4: "each invocation ... emits exactly one statement").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Expression(ExpressionStatement),
}

impl Statement {
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Expression(node) => node.span(),
        }
    }
}
