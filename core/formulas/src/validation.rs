//! FILENAME: core/formulas/src/validation.rs
//! PURPOSE: Checks a formula's declared inputs before compiling it.

use crate::error::DeclarationError;
use engine::VariableDeclaration;
use std::collections::HashSet;

/// True if `symbol` lexes as a single identifier, so it can be used in an expression.
pub use parser::is_valid_symbol;

/// Rejects malformed and repeated symbols, reporting the first offender in
/// declaration order.
pub fn validate_declarations(inputs: &[VariableDeclaration]) -> Result<(), DeclarationError> {
    let mut seen = HashSet::with_capacity(inputs.len());
    for input in inputs {
        if !is_valid_symbol(&input.symbol) {
            return Err(DeclarationError::InvalidSymbol(input.symbol.clone()));
        }
        if !seen.insert(input.symbol.as_str()) {
            return Err(DeclarationError::DuplicateSymbol(input.symbol.clone()));
        }
    }
    Ok(())
}
