//! FILENAME: core/engine/src/generator.rs
//! PURPOSE: Builds the weighted-average formula from a list of declarations.
//! CONTEXT: The authoring shortcut behind "Generate Weighted Average Formula".
//! The tree is built directly, then rendered to text with the canonical
//! renderer, so re-parsing the text yields the same tree.
//!
//! SHAPE: (s1 * c1 + s2 * c2 + ... + sn * cn) / (c1 + c2 + ... + cn)
//! A zero coefficient sum is accepted; dividing by it is an evaluation error.

use crate::declaration::VariableDeclaration;
use parser::{is_valid_symbol, render, BinaryOperator, Expression};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerateError {
    #[error("Cannot generate a formula without variables")]
    EmptyFormula,

    #[error("Invalid variable symbol: {0:?}")]
    InvalidSymbol(String),

    #[error("Coefficient of {symbol} must be a non-negative number, got {coefficient}")]
    InvalidCoefficient { symbol: String, coefficient: f64 },
}

/// A generated formula: its canonical text and the matching tree.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFormula {
    pub expression: String,
    pub ast: Expression,
}

/// Generates `Σ(symbol * coefficient) / Σ(coefficient)` over `vars`, in order.
pub fn generate(vars: &[VariableDeclaration]) -> Result<GeneratedFormula, GenerateError> {
    if vars.is_empty() {
        return Err(GenerateError::EmptyFormula);
    }

    let mut terms = Vec::with_capacity(vars.len());
    let mut weights = Vec::with_capacity(vars.len());

    for var in vars {
        if !is_valid_symbol(&var.symbol) {
            return Err(GenerateError::InvalidSymbol(var.symbol.clone()));
        }
        if !var.coefficient.is_finite() || var.coefficient < 0.0 {
            return Err(GenerateError::InvalidCoefficient {
                symbol: var.symbol.clone(),
                coefficient: var.coefficient,
            });
        }

        // Adding zero folds -0.0 into 0.0, which renders without a sign
        let coefficient = var.coefficient + 0.0;

        terms.push(Expression::binary(
            Expression::variable(var.symbol.as_str()),
            BinaryOperator::Multiply,
            Expression::literal(coefficient),
        ));
        weights.push(Expression::literal(coefficient));
    }

    let ast = Expression::binary(sum(terms), BinaryOperator::Divide, sum(weights));
    let expression = render(&ast);

    Ok(GeneratedFormula { expression, ast })
}

/// Left fold with `+`, matching how the parser builds `a + b + c`.
fn sum(operands: Vec<Expression>) -> Expression {
    operands
        .into_iter()
        .reduce(|acc, next| Expression::binary(acc, BinaryOperator::Add, next))
        .unwrap_or(Expression::Literal(0.0))
}
