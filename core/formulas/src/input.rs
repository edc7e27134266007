//! FILENAME: core/formulas/src/input.rs
//! PURPOSE: Converts raw form values into a numeric binding table.
//! CONTEXT: Calculator fields arrive either as JSON numbers or as the text
//! the user typed. Blank or unparsable text is an error, never zero.

use engine::{Bindings, EvalError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One raw value entered for a variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    Number(f64),
    Text(String),
}

impl InputValue {
    /// The finite number this value denotes, if any.
    pub fn to_number(&self) -> Option<f64> {
        let value = match self {
            InputValue::Number(n) => *n,
            InputValue::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok()?
            }
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for InputValue {
    fn from(value: f64) -> Self {
        InputValue::Number(value)
    }
}

impl From<&str> for InputValue {
    fn from(text: &str) -> Self {
        InputValue::Text(text.to_string())
    }
}

impl From<String> for InputValue {
    fn from(text: String) -> Self {
        InputValue::Text(text)
    }
}

/// Symbol -> raw value, as collected from the calculator form.
pub type InputValues = HashMap<String, InputValue>;

/// Builds the binding table for `required` symbols, in order. Entries for
/// other symbols are ignored.
pub fn convert_inputs(required: &[String], values: &InputValues) -> Result<Bindings, EvalError> {
    let mut bindings = Bindings::with_capacity(required.len());
    for symbol in required {
        let raw = values
            .get(symbol)
            .ok_or_else(|| EvalError::UnboundVariable(symbol.clone()))?;
        let number = raw
            .to_number()
            .ok_or_else(|| EvalError::InvalidInput(symbol.clone()))?;
        bindings.insert(symbol.clone(), number);
    }
    Ok(bindings)
}
