//! FILENAME: core/formulas/src/record.rs
//! PURPOSE: Backend record shapes for formulas.
//! CONTEXT: The REST backend owns storage. These types only mirror its JSON
//! (snake_case field names) so the host can hand records to the compiler.

use engine::VariableDeclaration;
use serde::{Deserialize, Serialize};

/// A declared input as the backend stores it.
pub type FormulaInput = VariableDeclaration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formula {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub category_id: u64,
    pub expression: String,
    #[serde(default)]
    pub inputs: Vec<FormulaInput>,
    #[serde(default)]
    pub usage_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Payload for creating a formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateFormulaData {
    pub name: String,
    pub description: String,
    pub category_id: u64,
    pub expression: String,
    pub inputs: Vec<FormulaInput>,
}

/// Partial update; only the fields that are present get sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateFormulaData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Vec<FormulaInput>>,
}

impl UpdateFormulaData {
    pub fn is_empty(&self) -> bool {
        *self == UpdateFormulaData::default()
    }
}
