use crate::lexer::tokenize;
use crate::visitor::DebugVisitor;

use super::parse;

// Parses `source` and renders it without positions.
//
// Precedence is tested by checking that two differently parenthesized
// expressions produce the same tree.
fn ast(source: &str) -> String {
    let tokens = tokenize(source, "precedence.moa")
        .unwrap_or_else(|e| panic!("Tokenizing failed: {}\n{}", source, e));
    let expr = parse(tokens, "precedence.moa")
        .unwrap_or_else(|e| panic!("Expression parsing failed: {}\n{}", source, e));
    DebugVisitor::render(&expr)
}

#[test]
fn test_addition_vs_subtraction() {
    assert_eq!(ast("1 + 2 - 3"), ast("(1 + 2) - 3"));
    assert_eq!(ast("1 - 2 + 3"), ast("(1 - 2) + 3"));
    assert_eq!(
        ast("1 + 2 - 3 + 4 - 5 + 6"),
        ast("((((1 + 2) - 3) + 4) - 5) + 6")
    );
}

#[test]
fn test_multiplication_vs_division() {
    assert_eq!(ast("1 * 2 / 3"), ast("(1 * 2) / 3"));
    assert_eq!(ast("1 / 2 * 3"), ast("(1 / 2) * 3"));
    assert_eq!(ast("1 % 2 * 3 / 4"), ast("((1 % 2) * 3) / 4"));
}

#[test]
fn test_addition_vs_multiplication() {
    assert_eq!(ast("1 + 2 * 3"), ast("1 + (2 * 3)"));
    assert_eq!(ast("1 * 2 + 3"), ast("(1 * 2) + 3"));
    assert_eq!(ast("1 - 2 % 3"), ast("1 - (2 % 3)"));
    assert_ne!(ast("1 + 2 * 3"), ast("(1 + 2) * 3"));
}

#[test]
fn test_unary_vs_binary() {
    assert_eq!(ast("-1 * 2"), ast("(-1) * 2"));
    assert_eq!(ast("2 * -1"), ast("2 * (-1)"));
    assert_eq!(ast("-1 + 2"), ast("(-1) + 2"));
}

#[test]
fn test_unary_binds_to_parenthesized_group() {
    assert_eq!(
        ast("-(1 + 2)"),
        "expr.Unary(op='-', expr=expr.Binary(expr1=expr.Int(value=1), op='+', expr2=expr.Int(value=2)))"
    );
}
