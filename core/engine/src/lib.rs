//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the formula engine.
//! CONTEXT: Re-exports public types and modules for use by other crates.
//! Everything here is pure: no I/O, no logging, no shared mutable state.

pub mod binding;
pub mod declaration;
pub mod evaluator;
pub mod generator;

// Re-export commonly used types at the crate root
pub use binding::{check_bindings, collect_variables, declared_symbols, unused_declarations, BindingError};
pub use declaration::VariableDeclaration;
pub use evaluator::{evaluate, Bindings, EvalError, EvalResult, Evaluator};
pub use generator::{generate, GenerateError, GeneratedFormula};
