//! FILENAME: core/parser/src/ast.rs
//! PURPOSE: Defines the Abstract Syntax Tree (AST) for formula expressions.
//! CONTEXT: After the Lexer tokenizes a formula string, the Parser converts
//! those tokens into this tree structure. The Evaluator then traverses
//! this tree with a binding table to compute the final result.
//!
//! SUPPORTED EXPRESSIONS:
//! - Literals: decimal numbers
//! - Variables: declared symbols such as Math or TaxRate
//! - Binary operations: +, -, *, /, ^
//! - Unary operations: - (negation)
//!
//! Trees are immutable once built and each node owns its children exclusively.

/// Represents a parsed formula expression.
#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    /// A numeric literal.
    Literal(f64),

    /// A reference to a declared variable, bound by symbol at evaluation time.
    Variable(String),

    /// A binary operation: left op right (e.g., Math * 2).
    BinaryOp {
        left: Box<Expression>,
        op: BinaryOperator,
        right: Box<Expression>,
    },

    /// Negation of the operand (e.g., -x).
    UnaryMinus(Box<Expression>),
}

/// Binary operators for expressions.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum BinaryOperator {
    Add,      // +
    Subtract, // -
    Multiply, // *
    Divide,   // /
    Power,    // ^ (highest precedence, right-associative)
}

/// Binding power of unary minus. Sits between the multiplicative
/// operators and `^`, so `-2^2` is `-(2^2)`.
pub const UNARY_PRECEDENCE: u8 = 3;

impl BinaryOperator {
    /// Higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOperator::Add | BinaryOperator::Subtract => 1,
            BinaryOperator::Multiply | BinaryOperator::Divide => 2,
            BinaryOperator::Power => 4,
        }
    }

    pub fn is_right_associative(self) -> bool {
        self == BinaryOperator::Power
    }
}

impl Expression {
    pub fn literal(value: f64) -> Self {
        Expression::Literal(value)
    }

    pub fn variable(symbol: impl Into<String>) -> Self {
        Expression::Variable(symbol.into())
    }

    pub fn binary(left: Expression, op: BinaryOperator, right: Expression) -> Self {
        Expression::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn negate(operand: Expression) -> Self {
        Expression::UnaryMinus(Box::new(operand))
    }

    /// Number of nodes on the longest root-to-leaf path. A lone literal has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Expression::Literal(_) | Expression::Variable(_) => 1,
            Expression::BinaryOp { left, right, .. } => left.depth().max(right.depth()) + 1,
            Expression::UnaryMinus(operand) => operand.depth() + 1,
        }
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryOperator::Add => write!(f, "+"),
            BinaryOperator::Subtract => write!(f, "-"),
            BinaryOperator::Multiply => write!(f, "*"),
            BinaryOperator::Divide => write!(f, "/"),
            BinaryOperator::Power => write!(f, "^"),
        }
    }
}
