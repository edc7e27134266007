//! FILENAME: core/formulas/src/draft.rs
//! PURPOSE: State of a formula being authored, before it is sent to the backend.
//! CONTEXT: Mirrors the create-formula screen. Field values are kept as the
//! text the user typed; they are only converted when the draft is previewed,
//! generated, or submitted.

use crate::compiled::{format_result, CompiledFormula};
use crate::config::EngineConfig;
use crate::error::FormulaError;
use crate::input::{InputValue, InputValues};
use crate::record::CreateFormulaData;
use crate::{log_debug, log_info};
use engine::{generate, VariableDeclaration};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DraftError {
    #[error("No variable at index {0}")]
    NoSuchVariable(usize),

    #[error("A formula needs at least one variable")]
    LastVariable,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Variable {0} has no name")]
    MissingVariableName(usize),

    #[error("Coefficient of variable {index} is not a number: {text:?}")]
    InvalidCoefficient { index: usize, text: String },

    #[error(transparent)]
    Formula(#[from] FormulaError),
}

/// One variable row of the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftVariable {
    pub name: String,
    pub symbol: String,
    pub coefficient: String,
    pub description: String,
}

impl Default for DraftVariable {
    fn default() -> Self {
        DraftVariable {
            name: String::new(),
            symbol: String::new(),
            coefficient: "1".to_string(),
            description: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormulaDraft {
    pub name: String,
    pub description: String,
    pub category_id: Option<u64>,
    pub expression: String,
    variables: Vec<DraftVariable>,
    preview_values: HashMap<String, String>,
}

impl Default for FormulaDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl FormulaDraft {
    /// An empty draft with one blank variable.
    pub fn new() -> Self {
        FormulaDraft {
            name: String::new(),
            description: String::new(),
            category_id: None,
            expression: String::new(),
            variables: vec![DraftVariable::default()],
            preview_values: HashMap::new(),
        }
    }

    pub fn variables(&self) -> &[DraftVariable] {
        &self.variables
    }

    pub fn variable_mut(&mut self, index: usize) -> Result<&mut DraftVariable, DraftError> {
        self.variables
            .get_mut(index)
            .ok_or(DraftError::NoSuchVariable(index))
    }

    /// Appends a blank variable and returns its index.
    pub fn add_variable(&mut self) -> usize {
        self.variables.push(DraftVariable::default());
        self.variables.len() - 1
    }

    pub fn remove_variable(&mut self, index: usize) -> Result<DraftVariable, DraftError> {
        if index >= self.variables.len() {
            return Err(DraftError::NoSuchVariable(index));
        }
        if self.variables.len() == 1 {
            return Err(DraftError::LastVariable);
        }
        Ok(self.variables.remove(index))
    }

    /// Renames a variable's symbol, trimmed. A preview value typed under the
    /// old symbol follows the variable unless the new symbol already has one.
    pub fn set_symbol(&mut self, index: usize, symbol: &str) -> Result<(), DraftError> {
        let symbol = symbol.trim().to_string();
        let old = std::mem::replace(&mut self.variable_mut(index)?.symbol, symbol.clone());

        if old == symbol || symbol.is_empty() {
            return Ok(());
        }
        let still_used = self.variables.iter().any(|v| v.symbol == old);
        let carried = if still_used {
            self.preview_values.get(&old).cloned()
        } else {
            self.preview_values.remove(&old)
        };
        if let Some(value) = carried {
            self.preview_values.entry(symbol).or_insert(value);
        }
        Ok(())
    }

    pub fn set_coefficient(&mut self, index: usize, text: impl Into<String>) -> Result<(), DraftError> {
        self.variable_mut(index)?.coefficient = text.into();
        Ok(())
    }

    pub fn set_preview_value(&mut self, symbol: &str, text: impl Into<String>) {
        self.preview_values.insert(symbol.trim().to_string(), text.into());
    }

    pub fn preview_value(&self, symbol: &str) -> Option<&str> {
        self.preview_values.get(symbol.trim()).map(String::as_str)
    }

    /// Converts the variable rows into declarations.
    pub fn declarations(&self) -> Result<Vec<VariableDeclaration>, DraftError> {
        self.variables
            .iter()
            .enumerate()
            .map(|(index, var)| {
                if var.name.trim().is_empty() {
                    return Err(DraftError::MissingVariableName(index));
                }
                let coefficient = InputValue::from(var.coefficient.as_str())
                    .to_number()
                    .ok_or_else(|| DraftError::InvalidCoefficient {
                        index,
                        text: var.coefficient.clone(),
                    })?;

                let mut decl = VariableDeclaration::new(var.name.trim(), var.symbol.trim())
                    .with_coefficient(coefficient);
                if !var.description.trim().is_empty() {
                    decl = decl.with_description(var.description.trim());
                }
                Ok(decl)
            })
            .collect()
    }

    /// Replaces the expression with the weighted average of the variables.
    pub fn generate_expression(&mut self) -> Result<&str, DraftError> {
        let generated = generate(&self.declarations()?).map_err(FormulaError::from)?;
        log_debug!("DRAFT", "generated {}", generated.expression);
        self.expression = generated.expression;
        Ok(&self.expression)
    }

    /// Calculates the expression with the preview values, formatted for display.
    pub fn preview(&self, config: &EngineConfig) -> Result<String, DraftError> {
        let compiled = CompiledFormula::compile(&self.expression, &self.declarations()?, config)?;
        let values: InputValues = self
            .preview_values
            .iter()
            .map(|(symbol, text)| (symbol.clone(), InputValue::from(text.as_str())))
            .collect();
        let value = compiled.calculate(&values)?;
        Ok(format_result(value, config.display_precision))
    }

    /// Checks the draft and builds the creation payload.
    pub fn to_create_data(&self, config: &EngineConfig) -> Result<CreateFormulaData, DraftError> {
        if self.name.trim().is_empty() {
            return Err(DraftError::MissingField("name"));
        }
        let category_id = self.category_id.ok_or(DraftError::MissingField("category"))?;
        if self.expression.trim().is_empty() {
            return Err(DraftError::MissingField("expression"));
        }

        let inputs = self.declarations()?;
        CompiledFormula::compile(&self.expression, &inputs, config)?;

        log_info!("DRAFT", "formula {:?} ready with {} inputs", self.name, inputs.len());
        Ok(CreateFormulaData {
            name: self.name.trim().to_string(),
            description: self.description.clone(),
            category_id,
            expression: self.expression.clone(),
            inputs,
        })
    }
}
