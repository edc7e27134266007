//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for formula integration tests.

#![allow(dead_code)]

use formulas::{
    CompiledFormula, EngineConfig, Formula, InputValue, InputValues, VariableDeclaration,
};

/// Test harness holding a config and the sample formula catalogue.
pub struct TestHarness {
    pub config: EngineConfig,
    pub formulas: Vec<Formula>,
}

impl TestHarness {
    /// Create a new test harness with default config and no formulas.
    pub fn new() -> Self {
        TestHarness {
            config: EngineConfig::default(),
            formulas: Vec::new(),
        }
    }

    /// Create a harness with the sample catalogue loaded.
    pub fn with_sample_data() -> Self {
        let mut harness = Self::new();
        harness.formulas = sample_formulas();
        harness
    }

    pub fn formula(&self, name: &str) -> &Formula {
        self.formulas
            .iter()
            .find(|f| f.name == name)
            .unwrap_or_else(|| panic!("no sample formula named {}", name))
    }

    pub fn compile(&self, name: &str) -> CompiledFormula {
        CompiledFormula::from_formula(self.formula(name), &self.config)
            .unwrap_or_else(|e| panic!("{} failed to compile: {}", name, e))
    }
}

fn input(name: &str, symbol: &str, description: &str) -> VariableDeclaration {
    VariableDeclaration::new(name, symbol).with_description(description)
}

fn formula(
    id: u64,
    name: &str,
    category_id: u64,
    expression: &str,
    inputs: Vec<VariableDeclaration>,
) -> Formula {
    Formula {
        id,
        name: name.to_string(),
        description: String::new(),
        category_id,
        expression: expression.to_string(),
        inputs,
        usage_count: 0,
        created_at: None,
        updated_at: None,
    }
}

pub fn sample_formulas() -> Vec<Formula> {
    vec![
        formula(
            1,
            "University Grade Calculator",
            1,
            "((Math * 2) + (Physics * 3) + (Chemistry * 1)) / (2+3+1)",
            vec![
                input("Math", "Math", "Your math grade"),
                input("Physics", "Physics", "Your physics grade"),
                input("Chemistry", "Chemistry", "Your chemistry grade"),
            ],
        ),
        formula(
            2,
            "Loan Payment Calculator",
            2,
            "P * (r * (1 + r)^n) / ((1 + r)^n - 1)",
            vec![
                input("Principal", "P", "The loan amount"),
                input("Monthly Interest Rate", "r", "Annual interest rate divided by 12 (in decimal)"),
                input("Number of Payments", "n", "Total number of monthly payments"),
            ],
        ),
        formula(
            3,
            "BMI Calculator",
            4,
            "weight / (height^2)",
            vec![
                input("Weight", "weight", "Weight in kilograms"),
                input("Height", "height", "Height in meters"),
            ],
        ),
        formula(
            4,
            "Compound Interest Calculator",
            2,
            "P * (1 + r/n)^(n*t)",
            vec![
                input("Principal", "P", "Initial investment"),
                input("Annual Rate", "r", "Annual interest rate (in decimal)"),
                input("Compounds per Year", "n", "Times interest is compounded per year"),
                input("Years", "t", "Investment duration in years"),
            ],
        ),
        formula(
            5,
            "Sales Commission Calculator",
            3,
            "sales * rate",
            vec![
                input("Sales", "sales", "Total sales amount"),
                input("Commission Rate", "rate", "Commission rate (in decimal)"),
            ],
        ),
        formula(
            6,
            "Employee Performance Score",
            3,
            "(Sales * 0.4) + (CustomerSat * 0.3) + (Attendance * 0.3)",
            vec![
                input("Sales", "Sales", "Sales score"),
                input("Customer Satisfaction", "CustomerSat", "Customer satisfaction score"),
                input("Attendance", "Attendance", "Attendance score"),
            ],
        ),
    ]
}

/// Builds form values from (symbol, text) pairs.
pub fn form(pairs: &[(&str, &str)]) -> InputValues {
    pairs
        .iter()
        .map(|(symbol, text)| (symbol.to_string(), InputValue::from(*text)))
        .collect()
}
