//! FILENAME: core/formulas/src/error.rs

use engine::{BindingError, EvalError, GenerateError};
use parser::{LexError, ParseError, SyntaxError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeclarationError {
    #[error("Invalid variable symbol: {0:?}")]
    InvalidSymbol(String),

    #[error("Duplicate variable symbol: {0}")]
    DuplicateSymbol(String),
}

/// Every way compiling or calculating a formula can fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormulaError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Declaration(#[from] DeclarationError),

    #[error(transparent)]
    Binding(#[from] BindingError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error(transparent)]
    Generate(#[from] GenerateError),
}

impl From<SyntaxError> for FormulaError {
    fn from(err: SyntaxError) -> Self {
        match err {
            SyntaxError::Lex(e) => FormulaError::Lex(e),
            SyntaxError::Parse(e) => FormulaError::Parse(e),
        }
    }
}

impl FormulaError {
    /// Character offset into the expression, for errors found while reading it.
    pub fn position(&self) -> Option<usize> {
        match self {
            FormulaError::Lex(e) => Some(e.position),
            FormulaError::Parse(e) => Some(e.position),
            _ => None,
        }
    }
}
