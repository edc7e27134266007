//! FILENAME: core/engine/src/binding.rs
//! PURPOSE: Checks the variables an AST references against a formula's declarations.
//! CONTEXT: After a formula is parsed into an AST, this module walks the tree
//! to find every variable reference. Undeclared symbols are reported all at
//! once, at bind time, so the outcome does not depend on which branches an
//! evaluation would reach. Declared symbols the expression never uses are
//! only a warning.

use crate::declaration::VariableDeclaration;
use parser::Expression;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    /// Every offending symbol, in order of first appearance.
    #[error("Undeclared variable(s): {}", .0.join(", "))]
    UndeclaredVariables(Vec<String>),
}

/// Collects every variable symbol in `expr`, deduplicated, in order of first appearance.
pub fn collect_variables(expr: &Expression) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut symbols = Vec::new();
    collect_recursive(expr, &mut seen, &mut symbols);
    symbols
}

fn collect_recursive<'e>(
    expr: &'e Expression,
    seen: &mut HashSet<&'e str>,
    symbols: &mut Vec<String>,
) {
    match expr {
        Expression::Literal(_) => {}
        Expression::Variable(symbol) => {
            if seen.insert(symbol.as_str()) {
                symbols.push(symbol.clone());
            }
        }
        Expression::BinaryOp { left, right, .. } => {
            collect_recursive(left, seen, symbols);
            collect_recursive(right, seen, symbols);
        }
        Expression::UnaryMinus(operand) => collect_recursive(operand, seen, symbols),
    }
}

/// Verifies that every variable in `expr` is one of `declared`.
pub fn check_bindings(expr: &Expression, declared: &HashSet<String>) -> Result<(), BindingError> {
    let undeclared: Vec<String> = collect_variables(expr)
        .into_iter()
        .filter(|symbol| !declared.contains(symbol))
        .collect();

    if undeclared.is_empty() {
        Ok(())
    } else {
        Err(BindingError::UndeclaredVariables(undeclared))
    }
}

/// Declared symbols that `expr` never references, sorted.
pub fn unused_declarations(expr: &Expression, declared: &HashSet<String>) -> Vec<String> {
    let used = collect_variables(expr);
    let mut unused: Vec<String> = declared
        .iter()
        .filter(|symbol| !used.contains(symbol))
        .cloned()
        .collect();
    unused.sort();
    unused
}

/// The symbol set of a declaration list.
pub fn declared_symbols(declarations: &[VariableDeclaration]) -> HashSet<String> {
    declarations.iter().map(|d| d.symbol.clone()).collect()
}
