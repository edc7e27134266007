//! FILENAME: core/parser/src/token.rs
//! PURPOSE: Token definitions for the formula lexer.
//! CONTEXT: Tokens are the atomic units produced by the lexer and consumed by the parser.
//! Every token carries the character position it started at so errors can point at it.

use crate::ast::BinaryOperator;

/// Single-character arithmetic operators.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Operator {
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
}

impl Operator {
    /// The binary operator this token denotes when it appears between operands.
    pub fn binary(self) -> BinaryOperator {
        match self {
            Operator::Plus => BinaryOperator::Add,
            Operator::Minus => BinaryOperator::Subtract,
            Operator::Star => BinaryOperator::Multiply,
            Operator::Slash => BinaryOperator::Divide,
            Operator::Caret => BinaryOperator::Power,
        }
    }
}

/// Tokens recognized by the formula lexer.
#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Number(f64),
    Identifier(String),
    Operator(Operator),
    LParen,
    RParen,
    /// Sentinel emitted once at the end of input.
    End,
}

/// A token together with the 0-based character offset where it begins.
#[derive(Debug, PartialEq, Clone)]
pub struct LocatedToken {
    pub token: Token,
    pub position: usize,
}

impl LocatedToken {
    pub fn new(token: Token, position: usize) -> Self {
        LocatedToken { token, position }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operator::Plus => write!(f, "+"),
            Operator::Minus => write!(f, "-"),
            Operator::Star => write!(f, "*"),
            Operator::Slash => write!(f, "/"),
            Operator::Caret => write!(f, "^"),
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Identifier(s) => write!(f, "{}", s),
            Token::Operator(op) => write!(f, "{}", op),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::End => write!(f, "end of input"),
        }
    }
}
