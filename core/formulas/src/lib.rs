//! FILENAME: core/formulas/src/lib.rs
// PURPOSE: Formula layer entry point.
// CONTEXT: Ties the parser and engine to the records, form inputs and
// authoring state of the formula client. The only crate that logs.

pub mod logging;

pub mod compiled;
pub mod config;
pub mod draft;
pub mod error;
pub mod input;
pub mod record;
pub mod validation;

pub use compiled::{calculate, format_result, CompiledFormula};
pub use config::{ConfigError, EngineConfig};
pub use draft::{DraftError, DraftVariable, FormulaDraft};
pub use error::{DeclarationError, FormulaError};
pub use input::{convert_inputs, InputValue, InputValues};
pub use record::{CreateFormulaData, Formula, FormulaInput, UpdateFormulaData};
pub use validation::{is_valid_symbol, validate_declarations};

pub use engine::{Bindings, EvalError, GenerateError, VariableDeclaration};
