//! FILENAME: core/engine/src/evaluator.rs
//! PURPOSE: Evaluates AST expressions against a binding table.
//! CONTEXT: After a formula is parsed into an AST, this module traverses
//! the tree and computes the final number. Variables are resolved by
//! symbol lookup in the binding table, never by text substitution, so a
//! symbol that is a prefix of another (Tax / TaxRate) cannot collide.
//!
//! SUPPORTED FEATURES:
//! - Literal evaluation
//! - Variable lookup from the binding table
//! - Binary operations: +, -, *, /, ^
//! - Unary operations: - (negation)
//!
//! Division by zero and every non-finite intermediate result are reported
//! as errors instead of leaking NaN or Infinity to the caller.

use parser::{BinaryOperator, Expression};
use std::collections::HashMap;
use thiserror::Error;

/// Symbol -> value table supplied fresh for each evaluation.
pub type Bindings = HashMap<String, f64>;

/// Runtime arithmetic faults.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("Unbound variable: {0}")]
    UnboundVariable(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Result is not a finite number")]
    NonFiniteResult,

    #[error("Invalid numeric input for {0}")]
    InvalidInput(String),
}

pub type EvalResult = Result<f64, EvalError>;

/// The formula evaluator.
/// Holds a reference to the binding table for variable lookups.
pub struct Evaluator<'a> {
    bindings: &'a Bindings,
}

impl<'a> Evaluator<'a> {
    pub fn new(bindings: &'a Bindings) -> Self {
        Evaluator { bindings }
    }

    /// Evaluates an AST expression and returns the result.
    pub fn evaluate(&self, expr: &Expression) -> EvalResult {
        match expr {
            Expression::Literal(value) => finite(*value),
            Expression::Variable(symbol) => self.eval_variable(symbol),
            Expression::BinaryOp { left, op, right } => self.eval_binary_op(left, *op, right),
            Expression::UnaryMinus(operand) => Ok(-self.evaluate(operand)?),
        }
    }

    fn eval_variable(&self, symbol: &str) -> EvalResult {
        match self.bindings.get(symbol) {
            Some(value) if value.is_finite() => Ok(*value),
            Some(_) => Err(EvalError::InvalidInput(symbol.to_string())),
            None => Err(EvalError::UnboundVariable(symbol.to_string())),
        }
    }

    /// Evaluates a binary operation. Both operands are computed, left first.
    fn eval_binary_op(
        &self,
        left: &Expression,
        op: BinaryOperator,
        right: &Expression,
    ) -> EvalResult {
        let l = self.evaluate(left)?;
        let r = self.evaluate(right)?;

        let result = match op {
            BinaryOperator::Add => l + r,
            BinaryOperator::Subtract => l - r,
            BinaryOperator::Multiply => l * r,
            BinaryOperator::Divide => {
                if r == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                l / r
            }
            BinaryOperator::Power => l.powf(r),
        };

        finite(result)
    }
}

fn finite(value: f64) -> EvalResult {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::NonFiniteResult)
    }
}

/// Evaluates `expr` with the given bindings.
pub fn evaluate(expr: &Expression, bindings: &Bindings) -> EvalResult {
    Evaluator::new(bindings).evaluate(expr)
}
