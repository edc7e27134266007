//! FILENAME: core/engine/src/declaration.rs
//! PURPOSE: Declared formula inputs.
//! CONTEXT: A formula lists the variables it expects. The symbol is the
//! binding key used inside the expression; the name is only for display.

use serde::{Deserialize, Serialize};

fn default_coefficient() -> f64 {
    1.0
}

/// One declared input of a formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclaration {
    /// Human-readable label, e.g. "Mathematics".
    pub name: String,
    /// Binding key, e.g. "Math". Must be a valid identifier.
    pub symbol: String,
    /// Weight used by the weighted-average generator.
    #[serde(default = "default_coefficient")]
    pub coefficient: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl VariableDeclaration {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        VariableDeclaration {
            name: name.into(),
            symbol: symbol.into(),
            coefficient: default_coefficient(),
            description: None,
        }
    }

    pub fn with_coefficient(mut self, coefficient: f64) -> Self {
        self.coefficient = coefficient;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
