//! FILENAME: core/parser/src/lexer.rs
//! PURPOSE: Scans a raw formula string and produces a stream of Tokens.
//! CONTEXT: This is the first stage of the parsing pipeline. It handles
//! whitespace skipping, decimal numbers, identifiers (variable symbols),
//! and the single-character operators.
//!
//! SUPPORTED INPUT:
//! - Numbers: 42, 3.14, .5 (no exponent notation)
//! - Identifiers: [A-Za-z_][A-Za-z0-9_]*, case preserved
//! - Single char: + - * / ^ ( )
//!
//! Anything else is rejected with a LexError pointing at the character.

use crate::token::{LocatedToken, Operator, Token};
use std::iter::Peekable;
use std::str::Chars;

/// A character the lexer does not recognize.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct LexError {
    /// 0-based character offset of the offending character.
    pub position: usize,
    pub character: char,
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Unexpected character '{}' at position {}",
            self.character, self.position
        )
    }
}

impl std::error::Error for LexError {}

pub struct Lexer<'a> {
    input: Peekable<Chars<'a>>,
    /// Character offset of the next unread character.
    position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input: input.chars().peekable(),
            position: 0,
        }
    }

    /// Advances the lexer and returns the next token.
    /// Once the input is exhausted every call returns `Token::End`.
    pub fn next_token(&mut self) -> Result<LocatedToken, LexError> {
        self.skip_whitespace();

        let start = self.position;
        let token = match self.bump() {
            Some('+') => Token::Operator(Operator::Plus),
            Some('-') => Token::Operator(Operator::Minus),
            Some('*') => Token::Operator(Operator::Star),
            Some('/') => Token::Operator(Operator::Slash),
            Some('^') => Token::Operator(Operator::Caret),
            Some('(') => Token::LParen,
            Some(')') => Token::RParen,

            // Numbers start with a digit or a dot (.5)
            Some(ch) if ch.is_ascii_digit() || ch == '.' => self.read_number(ch, start)?,

            Some(ch) if is_identifier_start(ch) => self.read_identifier(ch),

            None => Token::End,

            Some(ch) => {
                return Err(LexError {
                    position: start,
                    character: ch,
                })
            }
        };

        Ok(LocatedToken::new(token, start))
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.input.next()?;
        self.position += 1;
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(&ch) = self.input.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.bump();
        }
    }

    fn read_number(&mut self, first_char: char, start: usize) -> Result<Token, LexError> {
        let mut number_str = String::from(first_char);
        let mut has_dot = first_char == '.';
        let mut has_digit = first_char != '.';

        while let Some(&ch) = self.input.peek() {
            if ch.is_ascii_digit() {
                has_digit = true;
            } else if ch == '.' && !has_dot {
                has_dot = true;
            } else {
                break;
            }
            number_str.push(ch);
            self.bump();
        }

        // A lone "." is not a number
        if !has_digit {
            return Err(LexError {
                position: start,
                character: first_char,
            });
        }

        // Digit runs past f64::MAX overflow to infinity, which has no literal form
        match number_str.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Token::Number(value)),
            _ => Err(LexError {
                position: start,
                character: first_char,
            }),
        }
    }

    fn read_identifier(&mut self, first_char: char) -> Token {
        let mut ident = String::from(first_char);

        while let Some(&ch) = self.input.peek() {
            if !is_identifier_continue(ch) {
                break;
            }
            ident.push(ch);
            self.bump();
        }

        Token::Identifier(ident)
    }
}

/// Scans the whole input. The returned sequence always ends with exactly one `Token::End`.
pub fn tokenize(source: &str) -> Result<Vec<LocatedToken>, LexError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();

    loop {
        let located = lexer.next_token()?;
        let done = located.token == Token::End;
        tokens.push(located);
        if done {
            return Ok(tokens);
        }
    }
}

/// Returns true if `ch` can start an identifier.
pub fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

/// Returns true if `ch` can continue an identifier.
pub fn is_identifier_continue(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Returns true if `symbol` lexes as exactly one identifier token.
pub fn is_valid_symbol(symbol: &str) -> bool {
    let mut chars = symbol.chars();
    match chars.next() {
        Some(first) if is_identifier_start(first) => chars.all(is_identifier_continue),
        _ => false,
    }
}
