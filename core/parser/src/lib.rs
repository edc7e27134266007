//! FILENAME: core/parser/src/lib.rs
//! PURPOSE: Library root for the formula expression parser.
//! CONTEXT: This module exposes the lexer, parser, AST and renderer
//! needed to convert formula strings into evaluatable expression trees.
//!
//! PIPELINE: Formula String --> Lexer --> Tokens --> Parser --> AST --> Evaluator
//!
//! SUPPORTED FEATURES:
//! - Arithmetic: +, -, *, /, ^ (power, right-associative)
//! - Named variables: Math, Tax, TaxRate (bound later by symbol, never by text search)
//! - Parentheses for grouping
//! - Unary negation: -5

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod render;
pub mod token;

// Register the separate tests module
#[cfg(test)]
mod tests;

// Re-export commonly used types for convenience
pub use ast::{BinaryOperator, Expression};
pub use lexer::{is_valid_symbol, tokenize, LexError, Lexer};
pub use parser::{
    parse, parse_str, parse_str_with_limit, parse_str_with_limits, ParseError, ParseErrorKind,
    ParseResult, Parser, SyntaxError, DEFAULT_MAX_DEPTH, DEFAULT_MAX_TREE_DEPTH,
};
pub use render::render;
pub use token::{LocatedToken, Operator, Token};
