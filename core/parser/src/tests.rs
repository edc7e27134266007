//! FILENAME: core/parser/src/tests.rs
//! PURPOSE: Consolidated unit tests for the parser crate.

use crate::ast::{BinaryOperator, Expression};
use crate::lexer::{is_valid_symbol, tokenize, LexError, Lexer};
use crate::parser::{
    parse, parse_str, parse_str_with_limit, parse_str_with_limits, ParseError, ParseErrorKind,
    SyntaxError, DEFAULT_MAX_DEPTH, DEFAULT_MAX_TREE_DEPTH,
};
use crate::render::render;
use crate::token::{LocatedToken, Operator, Token};

fn num(n: f64) -> Expression {
    Expression::Literal(n)
}

fn var(s: &str) -> Expression {
    Expression::Variable(s.to_string())
}

fn bin(left: Expression, op: BinaryOperator, right: Expression) -> Expression {
    Expression::binary(left, op, right)
}

fn tokens_of(input: &str) -> Vec<Token> {
    tokenize(input)
        .unwrap()
        .into_iter()
        .map(|located| located.token)
        .collect()
}

fn parse_error(input: &str) -> ParseError {
    match parse_str(input) {
        Err(SyntaxError::Parse(e)) => e,
        other => panic!("expected parse error for {:?}, got {:?}", input, other),
    }
}

// ========================================
// LEXER TESTS
// ========================================

#[test]
fn lexer_tokenizes_simple_math() {
    let mut lexer = Lexer::new("1 + 2");

    assert_eq!(lexer.next_token().unwrap(), LocatedToken::new(Token::Number(1.0), 0));
    assert_eq!(
        lexer.next_token().unwrap(),
        LocatedToken::new(Token::Operator(Operator::Plus), 2)
    );
    assert_eq!(lexer.next_token().unwrap(), LocatedToken::new(Token::Number(2.0), 4));
    assert_eq!(lexer.next_token().unwrap(), LocatedToken::new(Token::End, 5));
    // Stays at End
    assert_eq!(lexer.next_token().unwrap().token, Token::End);
}

#[test]
fn lexer_tokenizes_all_operators() {
    assert_eq!(
        tokens_of("+ - * / ^ ( )"),
        vec![
            Token::Operator(Operator::Plus),
            Token::Operator(Operator::Minus),
            Token::Operator(Operator::Star),
            Token::Operator(Operator::Slash),
            Token::Operator(Operator::Caret),
            Token::LParen,
            Token::RParen,
            Token::End,
        ]
    );
}

#[test]
fn lexer_reads_decimals() {
    assert_eq!(
        tokens_of("3.25 .5 7."),
        vec![
            Token::Number(3.25),
            Token::Number(0.5),
            Token::Number(7.0),
            Token::End
        ]
    );
}

#[test]
fn lexer_has_no_exponent_notation() {
    // "1e10" is a number followed by an identifier
    assert_eq!(
        tokens_of("1e10"),
        vec![
            Token::Number(1.0),
            Token::Identifier("e10".to_string()),
            Token::End
        ]
    );
}

#[test]
fn lexer_second_dot_starts_new_number() {
    assert_eq!(
        tokens_of("1.2.3"),
        vec![Token::Number(1.2), Token::Number(0.3), Token::End]
    );
}

#[test]
fn lexer_preserves_identifier_case() {
    assert_eq!(
        tokens_of("Tax TaxRate _x1"),
        vec![
            Token::Identifier("Tax".to_string()),
            Token::Identifier("TaxRate".to_string()),
            Token::Identifier("_x1".to_string()),
            Token::End,
        ]
    );
}

#[test]
fn lexer_does_not_split_identifier_prefixes() {
    let tokens = tokenize("TaxRate+Tax").unwrap();
    assert_eq!(tokens[0], LocatedToken::new(Token::Identifier("TaxRate".to_string()), 0));
    assert_eq!(tokens[2], LocatedToken::new(Token::Identifier("Tax".to_string()), 8));
}

#[test]
fn lexer_rejects_unknown_character() {
    assert_eq!(
        tokenize("a + $b"),
        Err(LexError {
            position: 4,
            character: '$'
        })
    );
}

#[test]
fn lexer_rejects_lone_dot() {
    assert_eq!(
        tokenize("2 * ."),
        Err(LexError {
            position: 4,
            character: '.'
        })
    );
}

#[test]
fn lexer_rejects_number_that_overflows() {
    let source = format!("x + {}", "9".repeat(400));
    assert_eq!(
        tokenize(&source),
        Err(LexError {
            position: 4,
            character: '9'
        })
    );
    assert!(tokenize(&"9".repeat(300)).is_ok());
}

#[test]
fn lexer_positions_count_characters_not_bytes() {
    assert_eq!(
        tokenize("é"),
        Err(LexError {
            position: 0,
            character: 'é'
        })
    );
    assert_eq!(
        tokenize("1 + é"),
        Err(LexError {
            position: 4,
            character: 'é'
        })
    );
}

#[test]
fn lexer_empty_input_is_just_end() {
    assert_eq!(tokenize("").unwrap(), vec![LocatedToken::new(Token::End, 0)]);
    assert_eq!(tokenize("   ").unwrap(), vec![LocatedToken::new(Token::End, 3)]);
}

#[test]
fn valid_symbols() {
    assert!(is_valid_symbol("Math"));
    assert!(is_valid_symbol("_tmp2"));
    assert!(!is_valid_symbol(""));
    assert!(!is_valid_symbol("2x"));
    assert!(!is_valid_symbol("tax rate"));
    assert!(!is_valid_symbol("a-b"));
}

// ========================================
// PARSER TESTS - LITERALS AND VARIABLES
// ========================================

#[test]
fn parser_parses_number_literal() {
    assert_eq!(parse_str("42").unwrap(), num(42.0));
}

#[test]
fn parser_parses_decimal_number() {
    assert_eq!(parse_str("3.14159").unwrap(), num(3.14159));
}

#[test]
fn parser_parses_variable() {
    assert_eq!(parse_str("Physics").unwrap(), var("Physics"));
}

#[test]
fn parser_accepts_token_slice() {
    let tokens = tokenize("x * 2").unwrap();
    assert_eq!(
        parse(&tokens).unwrap(),
        bin(var("x"), BinaryOperator::Multiply, num(2.0))
    );
}

// ========================================
// PARSER TESTS - OPERATOR PRECEDENCE
// ========================================

#[test]
fn parser_respects_precedence_multiply_before_add() {
    // 2 + 3 * 4 should be parsed as 2 + (3 * 4)
    assert_eq!(
        parse_str("2+3*4").unwrap(),
        bin(
            num(2.0),
            BinaryOperator::Add,
            bin(num(3.0), BinaryOperator::Multiply, num(4.0))
        )
    );
}

#[test]
fn parser_respects_parentheses() {
    assert_eq!(
        parse_str("(2+3)*4").unwrap(),
        bin(
            bin(num(2.0), BinaryOperator::Add, num(3.0)),
            BinaryOperator::Multiply,
            num(4.0)
        )
    );
}

#[test]
fn parser_subtraction_is_left_associative() {
    assert_eq!(
        parse_str("10 - 3 - 2").unwrap(),
        bin(
            bin(num(10.0), BinaryOperator::Subtract, num(3.0)),
            BinaryOperator::Subtract,
            num(2.0)
        )
    );
}

#[test]
fn parser_division_is_left_associative() {
    assert_eq!(
        parse_str("8 / 4 / 2").unwrap(),
        bin(
            bin(num(8.0), BinaryOperator::Divide, num(4.0)),
            BinaryOperator::Divide,
            num(2.0)
        )
    );
}

#[test]
fn parser_power_is_right_associative() {
    assert_eq!(
        parse_str("2^3^2").unwrap(),
        bin(
            num(2.0),
            BinaryOperator::Power,
            bin(num(3.0), BinaryOperator::Power, num(2.0))
        )
    );
}

#[test]
fn parser_negation_wraps_power() {
    // -2^2 is -(2^2), not (-2)^2
    assert_eq!(
        parse_str("-2^2").unwrap(),
        Expression::negate(bin(num(2.0), BinaryOperator::Power, num(2.0)))
    );
}

#[test]
fn parser_allows_negative_exponent() {
    assert_eq!(
        parse_str("2^-1").unwrap(),
        bin(num(2.0), BinaryOperator::Power, Expression::negate(num(1.0)))
    );
}

#[test]
fn parser_negation_binds_tighter_than_multiply() {
    assert_eq!(
        parse_str("-a * b").unwrap(),
        bin(Expression::negate(var("a")), BinaryOperator::Multiply, var("b"))
    );
}

#[test]
fn parser_handles_double_negation() {
    assert_eq!(
        parse_str("--x").unwrap(),
        Expression::negate(Expression::negate(var("x")))
    );
}

#[test]
fn parser_parses_weighted_average_shape() {
    let expected = bin(
        bin(
            bin(var("Math"), BinaryOperator::Multiply, num(2.0)),
            BinaryOperator::Add,
            bin(var("Physics"), BinaryOperator::Multiply, num(3.0)),
        ),
        BinaryOperator::Divide,
        bin(num(2.0), BinaryOperator::Add, num(3.0)),
    );
    assert_eq!(
        parse_str("(Math * 2 + Physics * 3) / (2 + 3)").unwrap(),
        expected
    );
}

// ========================================
// PARSER TESTS - ERROR CASES
// ========================================

#[test]
fn parser_error_on_empty_expression() {
    assert_eq!(parse_error(""), ParseError::new(ParseErrorKind::UnexpectedEnd, 0));
}

#[test]
fn parser_error_on_unclosed_paren_after_operator() {
    assert_eq!(
        parse_error("(2+"),
        ParseError::new(ParseErrorKind::UnbalancedParens, 0)
    );
}

#[test]
fn parser_error_on_unclosed_paren() {
    assert_eq!(
        parse_error("1 + (2 * (3 + 4)"),
        ParseError::new(ParseErrorKind::UnbalancedParens, 4)
    );
}

#[test]
fn parser_error_on_stray_close_paren() {
    assert_eq!(
        parse_error("1 + 2)"),
        ParseError::new(ParseErrorKind::UnbalancedParens, 5)
    );
    assert_eq!(
        parse_error(")"),
        ParseError::new(ParseErrorKind::UnbalancedParens, 0)
    );
}

#[test]
fn parser_error_on_empty_parens() {
    assert_eq!(
        parse_error("()"),
        ParseError::new(ParseErrorKind::UnexpectedToken, 1)
    );
}

#[test]
fn parser_error_on_trailing_operator() {
    assert_eq!(
        parse_error("1 +"),
        ParseError::new(ParseErrorKind::UnexpectedEnd, 3)
    );
}

#[test]
fn parser_error_on_double_operator() {
    assert_eq!(
        parse_error("1 + * 2"),
        ParseError::new(ParseErrorKind::UnexpectedToken, 4)
    );
}

#[test]
fn parser_rejects_implicit_multiplication() {
    assert_eq!(
        parse_error("2x"),
        ParseError::new(ParseErrorKind::UnexpectedToken, 1)
    );
    assert_eq!(
        parse_error("2 (x)"),
        ParseError::new(ParseErrorKind::UnexpectedToken, 2)
    );
}

#[test]
fn parser_reports_lex_errors() {
    assert_eq!(
        parse_str("Math # 2"),
        Err(SyntaxError::Lex(LexError {
            position: 5,
            character: '#'
        }))
    );
}

#[test]
fn parser_treats_missing_end_sentinel_as_end() {
    let tokens = vec![
        LocatedToken::new(Token::Number(1.0), 0),
        LocatedToken::new(Token::Operator(Operator::Plus), 2),
    ];
    assert_eq!(
        parse(&tokens),
        Err(ParseError::new(ParseErrorKind::UnexpectedEnd, 2))
    );
    assert_eq!(
        parse(&[]),
        Err(ParseError::new(ParseErrorKind::UnexpectedEnd, 0))
    );
}

// ========================================
// PARSER TESTS - DEPTH GUARD
// ========================================

#[test]
fn parser_rejects_pathological_nesting() {
    let source = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
    let err = parse_error(&source);
    assert_eq!(err.kind, ParseErrorKind::NestingTooDeep);
}

#[test]
fn parser_rejects_long_negation_chain() {
    let source = format!("{}1", "-".repeat(10_000));
    assert_eq!(parse_error(&source).kind, ParseErrorKind::NestingTooDeep);
}

#[test]
fn parser_accepts_long_flat_sum() {
    let source = vec!["1"; 300].join(" + ");
    let expr = parse_str(&source).unwrap();
    assert_eq!(expr.depth(), 300);
    assert_eq!(parse_str(&render(&expr)).unwrap(), expr);
}

#[test]
fn parser_accepts_long_chain_inside_parens() {
    let terms = vec!["x"; 500].join(" * ");
    assert!(parse_str(&format!("-(({}) / 2)", terms)).is_ok());
}

#[test]
fn parser_bounds_tree_depth_of_flat_chains() {
    let source = vec!["1"; DEFAULT_MAX_TREE_DEPTH + 1].join(" + ");
    assert_eq!(parse_error(&source).kind, ParseErrorKind::NestingTooDeep);
}

#[test]
fn parser_bounds_chains_nested_in_parens() {
    let chain = vec!["1"; 600].join(" + ");
    let source = format!("({}) + ({}) * 2", chain, chain);
    assert!(parse_str(&source).is_ok());

    // The parenthesized chain is the first operand of another long chain
    let stacked = chain.replacen("1", &format!("({})", chain), 1);
    assert_eq!(parse_error(&stacked).kind, ParseErrorKind::NestingTooDeep);
}

#[test]
fn parser_depth_limit_is_configurable() {
    assert!(parse_str_with_limit("((1))", 8).is_ok());
    assert_eq!(
        parse_str_with_limit("((((1))))", 3),
        Err(SyntaxError::Parse(ParseError::new(
            ParseErrorKind::NestingTooDeep,
            4
        )))
    );
    assert!(parse_str_with_limit("1 + 2 + 3 + 4", 3).is_ok());
}

#[test]
fn parser_tree_depth_limit_is_configurable() {
    assert_eq!(
        parse_str_with_limits("1 + 2 + 3 + 4", DEFAULT_MAX_DEPTH, 3),
        Err(SyntaxError::Parse(ParseError::new(
            ParseErrorKind::NestingTooDeep,
            10
        )))
    );
}

#[test]
fn expression_depth() {
    assert_eq!(num(1.0).depth(), 1);
    assert_eq!(parse_str("1 + 2 * 3").unwrap().depth(), 3);
    assert_eq!(parse_str("-x").unwrap().depth(), 2);
}

// ========================================
// RENDER TESTS
// ========================================

#[test]
fn render_uses_minimal_parentheses() {
    let cases = [
        ("2+3*4", "2 + 3 * 4"),
        ("(2+3)*4", "(2 + 3) * 4"),
        ("10-(3-2)", "10 - (3 - 2)"),
        ("(10-3)-2", "10 - 3 - 2"),
        ("2^3^2", "2 ^ 3 ^ 2"),
        ("(2^3)^2", "(2 ^ 3) ^ 2"),
        ("-2^2", "-2 ^ 2"),
        ("(-2)^2", "(-2) ^ 2"),
        ("2^-1", "2 ^ -1"),
        ("-(a+b)", "-(a + b)"),
        ("a*-b", "a * -b"),
        ("a/(b*c)", "a / (b * c)"),
        ("(Math*2+Physics*3)/(2+3)", "(Math * 2 + Physics * 3) / (2 + 3)"),
    ];

    for (source, expected) in cases {
        let ast = parse_str(source).unwrap();
        assert_eq!(render(&ast), expected, "rendering {}", source);
        assert_eq!(parse_str(expected).unwrap(), ast, "re-parsing {}", expected);
    }
}

#[test]
fn render_numbers_without_exponent() {
    assert_eq!(render(&num(1e21)), "1000000000000000000000");
    assert_eq!(render(&num(0.1)), "0.1");
    assert_eq!(render(&num(2.0)), "2");
}

// ========================================
// PROPERTY TESTS
// ========================================

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn token_strategy() -> impl Strategy<Value = Token> {
        prop_oneof![
            (0u32..1000).prop_map(|n| Token::Number(n as f64)),
            "[a-z]{1,3}".prop_map(Token::Identifier),
            prop_oneof![
                Just(Operator::Plus),
                Just(Operator::Minus),
                Just(Operator::Star),
                Just(Operator::Slash),
                Just(Operator::Caret),
            ]
            .prop_map(Token::Operator),
            Just(Token::LParen),
            Just(Token::RParen),
            Just(Token::End),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(512))]

        #[test]
        fn parse_is_total_over_token_streams(tokens in prop::collection::vec(token_strategy(), 0..40)) {
            let located: Vec<LocatedToken> = tokens
                .into_iter()
                .enumerate()
                .map(|(i, t)| LocatedToken::new(t, i))
                .collect();
            let _ = parse(&located);
        }

        #[test]
        fn parse_is_total_over_strings(source in "[0-9a-c_+*/^() .\\-#]{0,48}") {
            let _ = parse_str(&source);
        }

        #[test]
        fn render_round_trips(source in "[0-9a-c+*/^() .\\-]{0,48}") {
            if let Ok(ast) = parse_str(&source) {
                let rendered = render(&ast);
                prop_assert_eq!(parse_str(&rendered), Ok(ast));
            }
        }
    }
}
