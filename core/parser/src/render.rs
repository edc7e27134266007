//! FILENAME: core/parser/src/render.rs
//! PURPOSE: Renders an AST back into canonical formula text.
//! CONTEXT: Used for display and by the weighted-formula generator, which
//! builds its tree directly and then needs the matching source string.
//! Parentheses are emitted only where the grammar needs them to rebuild
//! the same tree, so parse(render(ast)) == ast.
//!
//! FORMAT: binary operators are spaced ("a + b"), negation is tight ("-a"),
//! numbers use the shortest decimal form that reads back to the same f64.
//! A negative literal is written as "-n" and reads back as a negation of n.

use crate::ast::{BinaryOperator, Expression, UNARY_PRECEDENCE};
use std::fmt::{self, Write};

/// Returns the canonical text of `expr`.
pub fn render(expr: &Expression) -> String {
    expr.to_string()
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(value) => write!(f, "{}", value),
            Expression::Variable(symbol) => f.write_str(symbol),
            Expression::BinaryOp { left, op, right } => {
                write_operand(f, left, needs_parens_left(*op, left))?;
                write!(f, " {} ", op)?;
                write_operand(f, right, needs_parens_right(*op, right))
            }
            Expression::UnaryMinus(operand) => {
                f.write_char('-')?;
                let wrap = binding_power(operand) < UNARY_PRECEDENCE;
                write_operand(f, operand, wrap)
            }
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expression, wrap: bool) -> fmt::Result {
    if wrap {
        write!(f, "({})", expr)
    } else {
        write!(f, "{}", expr)
    }
}

/// How tightly the root of `expr` holds together; atoms never need parentheses.
fn binding_power(expr: &Expression) -> u8 {
    match expr {
        Expression::Literal(_) | Expression::Variable(_) => u8::MAX,
        Expression::BinaryOp { op, .. } => op.precedence(),
        Expression::UnaryMinus(_) => UNARY_PRECEDENCE,
    }
}

fn needs_parens_left(parent: BinaryOperator, child: &Expression) -> bool {
    if parent == BinaryOperator::Power {
        // The base of a power is a primary: "-a ^ b" would negate the power
        return matches!(child, Expression::BinaryOp { .. } | Expression::UnaryMinus(_));
    }
    binding_power(child) < parent.precedence()
}

fn needs_parens_right(parent: BinaryOperator, child: &Expression) -> bool {
    let power = binding_power(child);
    if parent.is_right_associative() {
        // The exponent is parsed as a unary, which covers "-a" and "a ^ b"
        return power < UNARY_PRECEDENCE;
    }
    power <= parent.precedence()
}
