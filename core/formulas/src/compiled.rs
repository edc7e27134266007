//! FILENAME: core/formulas/src/compiled.rs
//! PURPOSE: A formula parsed and bound once, then evaluated many times.
//! CONTEXT: Compiling runs every static check (declarations, syntax, depth,
//! binding) so that a CompiledFormula can only fail at calculation time on
//! runtime inputs. It is immutable and may be shared across threads.

use crate::config::EngineConfig;
use crate::error::FormulaError;
use crate::input::{convert_inputs, InputValues};
use crate::record::Formula;
use crate::validation::validate_declarations;
use engine::{
    check_bindings, collect_variables, declared_symbols, unused_declarations, Bindings,
    VariableDeclaration,
};
use crate::{log_debug, log_enter, log_exit, log_warn};
use parser::{parse_str_with_limits, Expression};

#[derive(Debug, Clone, PartialEq)]
pub struct CompiledFormula {
    expression: String,
    inputs: Vec<VariableDeclaration>,
    ast: Expression,
    /// Referenced symbols, in declaration order.
    required: Vec<String>,
    /// Declared symbols the expression never uses.
    warnings: Vec<String>,
}

impl CompiledFormula {
    pub fn compile(
        expression: &str,
        inputs: &[VariableDeclaration],
        config: &EngineConfig,
    ) -> Result<Self, FormulaError> {
        log_enter!("COMPILE", "compile", "expression={:?} inputs={}", expression, inputs.len());

        let result = Self::compile_inner(expression, inputs, config);
        match &result {
            Ok(compiled) => {
                if !compiled.warnings.is_empty() {
                    log_warn!(
                        "COMPILE",
                        "unused declarations: {}",
                        compiled.warnings.join(", ")
                    );
                }
                log_exit!("COMPILE", "compile", "ok required={}", compiled.required.len());
            }
            Err(e) => {
                log_debug!("COMPILE", "rejected {:?}: {}", expression, e);
                log_exit!("COMPILE", "compile", "err");
            }
        }
        result
    }

    fn compile_inner(
        expression: &str,
        inputs: &[VariableDeclaration],
        config: &EngineConfig,
    ) -> Result<Self, FormulaError> {
        validate_declarations(inputs)?;

        let ast = parse_str_with_limits(
            expression,
            config.max_depth,
            config.max_tree_depth,
        )?;

        let declared = declared_symbols(inputs);
        check_bindings(&ast, &declared)?;

        let referenced = collect_variables(&ast);
        let required = inputs
            .iter()
            .filter(|input| referenced.contains(&input.symbol))
            .map(|input| input.symbol.clone())
            .collect();
        let warnings = unused_declarations(&ast, &declared);

        Ok(CompiledFormula {
            expression: expression.to_string(),
            inputs: inputs.to_vec(),
            ast,
            required,
            warnings,
        })
    }

    /// Compiles a backend record's expression against its inputs.
    pub fn from_formula(formula: &Formula, config: &EngineConfig) -> Result<Self, FormulaError> {
        Self::compile(&formula.expression, &formula.inputs, config)
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn inputs(&self) -> &[VariableDeclaration] {
        &self.inputs
    }

    pub fn ast(&self) -> &Expression {
        &self.ast
    }

    pub fn required_symbols(&self) -> &[String] {
        &self.required
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Evaluates against an already numeric binding table.
    pub fn evaluate(&self, bindings: &Bindings) -> Result<f64, FormulaError> {
        Ok(engine::evaluate(&self.ast, bindings)?)
    }

    /// Converts raw form values, then evaluates.
    pub fn calculate(&self, values: &InputValues) -> Result<f64, FormulaError> {
        let result = convert_inputs(&self.required, values)
            .map_err(FormulaError::from)
            .and_then(|bindings| self.evaluate(&bindings));

        match &result {
            Ok(value) => log_debug!("CALC", "{} = {}", self.expression, value),
            Err(e) => log_debug!("CALC", "{} failed: {}", self.expression, e),
        }
        result
    }
}

/// One-shot compile and calculate.
pub fn calculate(
    expression: &str,
    inputs: &[VariableDeclaration],
    values: &InputValues,
    config: &EngineConfig,
) -> Result<f64, FormulaError> {
    CompiledFormula::compile(expression, inputs, config)?.calculate(values)
}

/// Fixed-point display text for a result.
pub fn format_result(value: f64, precision: usize) -> String {
    format!("{:.*}", precision, value)
}
