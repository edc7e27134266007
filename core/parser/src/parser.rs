//! FILENAME: core/parser/src/parser.rs
//! PURPOSE: Recursive descent parser that converts a stream of Tokens into an AST.
//! CONTEXT: This is the second stage of the parsing pipeline. It takes the
//! token sequence from the Lexer and builds an Expression tree that can be
//! evaluated. Variable symbols are not checked here; that is the binding
//! check's job in the engine crate.
//!
//! GRAMMAR:
//!   expression     --> additive
//!   additive       --> multiplicative ( ("+" | "-") multiplicative )*
//!   multiplicative --> unary ( ("*" | "/") unary )*
//!   unary          --> "-" unary | power
//!   power          --> primary ( "^" unary )?
//!   primary        --> NUMBER | IDENTIFIER | "(" expression ")"
//!
//! `^` is right-associative through `unary -> power`, so 2^3^2 = 2^(3^2),
//! and unary minus wraps the whole power, so -2^2 = -(2^2).

use crate::ast::{BinaryOperator, Expression};
use crate::lexer::{tokenize, LexError};
use crate::token::{LocatedToken, Operator, Token};

/// Deepest parser recursion (parentheses, negation, exponents) accepted by default.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Deepest expression tree accepted by default. Flat `+ - * /` chains grow
/// the tree one level per operator without recursing in the parser, so they
/// get this larger bound instead of `DEFAULT_MAX_DEPTH`.
pub const DEFAULT_MAX_TREE_DEPTH: usize = 1024;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ParseErrorKind {
    UnexpectedToken,
    UnexpectedEnd,
    UnbalancedParens,
    NestingTooDeep,
}

/// A grammar error and the character position it refers to.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, position: usize) -> Self {
        ParseError { kind, position }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let what = match self.kind {
            ParseErrorKind::UnexpectedToken => "unexpected token",
            ParseErrorKind::UnexpectedEnd => "unexpected end of expression",
            ParseErrorKind::UnbalancedParens => "unbalanced parentheses",
            ParseErrorKind::NestingTooDeep => "expression nested too deeply",
        };
        write!(f, "Parse error: {} at position {}", what, self.position)
    }
}

impl std::error::Error for ParseError {}

pub type ParseResult<T> = Result<T, ParseError>;

/// Either stage of turning source text into an AST can fail.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum SyntaxError {
    Lex(LexError),
    Parse(ParseError),
}

impl SyntaxError {
    pub fn position(&self) -> usize {
        match self {
            SyntaxError::Lex(e) => e.position,
            SyntaxError::Parse(e) => e.position,
        }
    }
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyntaxError::Lex(e) => write!(f, "{}", e),
            SyntaxError::Parse(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SyntaxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SyntaxError::Lex(e) => Some(e),
            SyntaxError::Parse(e) => Some(e),
        }
    }
}

impl From<LexError> for SyntaxError {
    fn from(e: LexError) -> Self {
        SyntaxError::Lex(e)
    }
}

impl From<ParseError> for SyntaxError {
    fn from(e: ParseError) -> Self {
        SyntaxError::Parse(e)
    }
}

/// The Parser walks a borrowed token slice with a cursor.
pub struct Parser<'t> {
    tokens: &'t [LocatedToken],
    cursor: usize,
    /// Positions of the '(' tokens not yet closed, innermost last.
    open_parens: Vec<usize>,
    /// Current recursion level of the descent.
    nesting: usize,
    max_depth: usize,
    max_tree_depth: usize,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [LocatedToken]) -> Self {
        Parser {
            tokens,
            cursor: 0,
            open_parens: Vec::new(),
            nesting: 0,
            max_depth: DEFAULT_MAX_DEPTH,
            max_tree_depth: DEFAULT_MAX_TREE_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_tree_depth(mut self, max_tree_depth: usize) -> Self {
        self.max_tree_depth = max_tree_depth;
        self
    }

    /// Parses the entire token stream and returns the AST.
    pub fn parse(&mut self) -> ParseResult<Expression> {
        let expr = self.parse_expression()?;

        // Ensure we consumed all tokens
        match self.current() {
            Token::End => Ok(expr),
            Token::RParen => Err(ParseError::new(
                ParseErrorKind::UnbalancedParens,
                self.position(),
            )),
            _ => Err(self.unexpected()),
        }
    }

    /// The current token. A stream that lacks its `End` sentinel reads as ended.
    fn current(&self) -> &Token {
        self.tokens
            .get(self.cursor)
            .map(|t| &t.token)
            .unwrap_or(&Token::End)
    }

    fn position(&self) -> usize {
        match self.tokens.get(self.cursor) {
            Some(t) => t.position,
            None => self.tokens.last().map(|t| t.position).unwrap_or(0),
        }
    }

    fn advance(&mut self) {
        if self.cursor < self.tokens.len() {
            self.cursor += 1;
        }
    }

    fn current_operator(&self) -> Option<Operator> {
        match self.current() {
            Token::Operator(op) => Some(*op),
            _ => None,
        }
    }

    /// Error for the current token sitting where it does not belong.
    fn unexpected(&self) -> ParseError {
        match self.current() {
            Token::End => match self.open_parens.last() {
                Some(&open) => ParseError::new(ParseErrorKind::UnbalancedParens, open),
                None => ParseError::new(ParseErrorKind::UnexpectedEnd, self.position()),
            },
            Token::RParen if self.open_parens.is_empty() => {
                ParseError::new(ParseErrorKind::UnbalancedParens, self.position())
            }
            _ => ParseError::new(ParseErrorKind::UnexpectedToken, self.position()),
        }
    }

    fn too_deep(&self, position: usize) -> ParseError {
        ParseError::new(ParseErrorKind::NestingTooDeep, position)
    }

    /// Runs one recursive step, refusing to go past the depth limit.
    fn descend<T>(&mut self, f: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.nesting >= self.max_depth {
            return Err(self.too_deep(self.position()));
        }
        self.nesting += 1;
        let result = f(self);
        self.nesting -= 1;
        result
    }

    /// Rejects a node of `depth` built for the operator at `position`.
    fn check_depth(&self, depth: usize, position: usize) -> ParseResult<()> {
        if depth > self.max_tree_depth {
            Err(self.too_deep(position))
        } else {
            Ok(())
        }
    }

    /// Entry point for expression parsing.
    fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.parse_additive()
    }

    /// Parses additive expressions (+ and -).
    fn parse_additive(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_multiplicative()?;
        let mut depth = left.depth();

        while let Some(op @ (Operator::Plus | Operator::Minus)) = self.current_operator() {
            let op_position = self.position();
            self.advance();
            let right = self.parse_multiplicative()?;

            depth = depth.max(right.depth()) + 1;
            self.check_depth(depth, op_position)?;
            left = Expression::binary(left, op.binary(), right);
        }

        Ok(left)
    }

    /// Parses multiplicative expressions (* and /).
    fn parse_multiplicative(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_unary()?;
        let mut depth = left.depth();

        while let Some(op @ (Operator::Star | Operator::Slash)) = self.current_operator() {
            let op_position = self.position();
            self.advance();
            let right = self.parse_unary()?;

            depth = depth.max(right.depth()) + 1;
            self.check_depth(depth, op_position)?;
            left = Expression::binary(left, op.binary(), right);
        }

        Ok(left)
    }

    /// Parses unary expressions (negation).
    fn parse_unary(&mut self) -> ParseResult<Expression> {
        if self.current_operator() == Some(Operator::Minus) {
            self.advance();
            let operand = self.descend(Self::parse_unary)?;
            return Ok(Expression::negate(operand));
        }

        self.parse_power()
    }

    /// Parses power/exponentiation expressions (^).
    fn parse_power(&mut self) -> ParseResult<Expression> {
        let left = self.parse_primary()?;

        if self.current_operator() == Some(Operator::Caret) {
            let op_position = self.position();
            self.advance();
            let right = self.descend(Self::parse_unary)?;

            self.check_depth(left.depth().max(right.depth()) + 1, op_position)?;
            return Ok(Expression::binary(left, BinaryOperator::Power, right));
        }

        Ok(left)
    }

    /// Parses primary expressions (literals, variables, parentheses).
    fn parse_primary(&mut self) -> ParseResult<Expression> {
        match self.current().clone() {
            Token::Number(n) => {
                self.advance();
                Ok(Expression::Literal(n))
            }

            Token::Identifier(name) => {
                self.advance();
                Ok(Expression::Variable(name))
            }

            // Parenthesized expression
            Token::LParen => {
                self.open_parens.push(self.position());
                self.advance();
                let expr = self.descend(Self::parse_expression)?;

                if self.current() != &Token::RParen {
                    return Err(self.unexpected());
                }
                self.open_parens.pop();
                self.advance();
                Ok(expr)
            }

            _ => Err(self.unexpected()),
        }
    }
}

/// Parses a complete token stream with the default depth limit.
pub fn parse(tokens: &[LocatedToken]) -> ParseResult<Expression> {
    Parser::new(tokens).parse()
}

/// Convenience function to tokenize and parse a formula string directly.
pub fn parse_str(source: &str) -> Result<Expression, SyntaxError> {
    parse_str_with_limit(source, DEFAULT_MAX_DEPTH)
}

/// Like `parse_str`, with an explicit recursion limit.
pub fn parse_str_with_limit(source: &str, max_depth: usize) -> Result<Expression, SyntaxError> {
    parse_str_with_limits(source, max_depth, DEFAULT_MAX_TREE_DEPTH)
}

/// Like `parse_str`, with explicit recursion and tree depth limits.
pub fn parse_str_with_limits(
    source: &str,
    max_depth: usize,
    max_tree_depth: usize,
) -> Result<Expression, SyntaxError> {
    let tokens = tokenize(source)?;
    let expr = Parser::new(&tokens)
        .with_max_depth(max_depth)
        .with_max_tree_depth(max_tree_depth)
        .parse()?;
    Ok(expr)
}
