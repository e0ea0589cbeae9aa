use pretty_assertions::assert_eq;

use super::{MAX_REPETITIONS, TokenKind, tokenize};
use crate::errors::{ErrorKind, Phase};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source, "test.moa")
        .unwrap_or_else(|e| panic!("tokenize failed for {:?}: {}", source, e))
        .iter()
        .map(|t| t.kind)
        .collect()
}

fn values(source: &str) -> Vec<String> {
    tokenize(source, "test.moa")
        .unwrap()
        .into_iter()
        .map(|t| t.value)
        .collect()
}

#[test]
fn test_arithmetic_tokens() {
    use TokenKind::*;
    assert_eq!(
        kinds("4 * (10 + (4 - 5)) / 2.5 % 3"),
        vec![
            Number, Multiply, LParen, Number, Plus, LParen, Number, Minus, Number, RParen, RParen,
            Divide, Number, Modulo, Number,
        ]
    );
}

#[test]
fn test_positions() {
    let tokens = tokenize("12 +\n  3.5", "pos.moa").unwrap();
    let positions: Vec<(TokenKind, usize, usize, usize)> = tokens
        .iter()
        .map(|t| (t.kind, t.line, t.column, t.length))
        .collect();
    assert_eq!(
        positions,
        vec![
            (TokenKind::Number, 1, 0, 2),
            (TokenKind::Plus, 1, 3, 1),
            (TokenKind::Newline, 1, 4, 1),
            (TokenKind::Number, 2, 2, 3),
        ]
    );
    assert_eq!(&*tokens[3].source_line, "  3.5");
    assert_eq!(&*tokens[0].file, "pos.moa");
    assert_eq!(tokens[3].offset, 7);
}

#[test]
fn test_leading_dot_starts_number() {
    assert_eq!(values(".5 + 1."), vec![".5", "+", "1."]);
    assert_eq!(kinds("."), vec![TokenKind::Point]);
}

#[test]
fn test_whitespace_is_skipped() {
    assert_eq!(values(" \t1\r\n"), vec!["1"]);
    assert_eq!(kinds(""), vec![]);
    assert_eq!(kinds("   "), vec![]);
}

#[test]
fn test_consecutive_breaks_collapse() {
    use TokenKind::*;
    assert_eq!(kinds("1\n\n\n2"), vec![Number, Newline, Number]);
    assert_eq!(kinds("\n\n1"), vec![Number]);
    assert_eq!(kinds("1\n"), vec![Number]);

    let tokens = tokenize("\n\n1\n\n2", "lines.moa").unwrap();
    assert_eq!(tokens[0].line, 3);
    assert_eq!(tokens[2].line, 5);
    assert_eq!(tokens[2].column, 0);
}

#[test]
fn test_colon_before_line_end_is_suppressed() {
    use TokenKind::*;
    assert_eq!(kinds("1:\n\n2"), vec![Number, Number]);
    assert_eq!(kinds("1:  "), vec![Number]);
    assert_eq!(kinds(":1"), vec![Number]);

    let tokens = tokenize("1:\n\n2", "colon.moa").unwrap();
    assert_eq!(tokens[1].line, 3);
}

#[test]
fn test_inline_colon_separates() {
    let tokens = tokenize("1 : 2", "colon.moa").unwrap();
    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![TokenKind::Number, TokenKind::Newline, TokenKind::Number]
    );
    assert_eq!(tokens[1].value, ":");
    assert_eq!(tokens[1].column, 2);
}

#[test]
fn test_unexpected_character() {
    let err = tokenize("1 + x", "bad.moa").unwrap_err();
    assert_eq!(err.kind, ErrorKind::SyntaxError);
    assert_eq!(err.phase, Phase::Lexer);
    assert_eq!(err.message, "Unexpected character 'x'");
    assert_eq!((err.location.line, err.location.column), (1, 4));
    assert_eq!(err.trail, vec!["tokenize"]);
}

#[test]
fn test_too_many_dots() {
    let err = tokenize("1..2", "dots.moa").unwrap_err();
    assert_eq!(err.kind, ErrorKind::SyntaxError);
    assert_eq!(err.message, "Too many dots in float number");
    assert_eq!((err.location.column, err.location.length), (0, 4));
    assert_eq!(err.trail, vec!["tokenize", "tokenize_number"]);
}

#[test]
fn test_unclosed_paren_points_at_innermost() {
    let err = tokenize("(1 + (2", "paren.moa").unwrap_err();
    assert_eq!(err.kind, ErrorKind::SyntaxError);
    assert_eq!(err.message, "'(' was never closed");
    assert_eq!(err.location.column, 5);

    let err = tokenize("(1 + 2", "paren.moa").unwrap_err();
    assert_eq!(err.location.column, 0);
    assert_eq!(err.location.length, 1);
}

#[test]
fn test_unmatched_closer() {
    let err = tokenize("1 + 2)", "paren.moa").unwrap_err();
    assert_eq!(err.message, "Unmatched ')'");
    assert_eq!(err.location.column, 5);
    assert_eq!(err.trail, vec!["tokenize", "tokenize_operator"]);

    let err = tokenize("(1]", "paren.moa").unwrap_err();
    assert_eq!(err.message, "Unmatched ']'");
}

#[test]
fn test_other_brackets_are_lexed() {
    use TokenKind::*;
    assert_eq!(kinds("[{()}]"), vec![LBracket, LBrace, LParen, RParen, RBrace, RBracket]);
}

#[test]
fn test_repetition_guard() {
    let source = "-".repeat(MAX_REPETITIONS + 1);
    let err = tokenize(&source, "loop.moa").unwrap_err();
    assert_eq!(err.kind, ErrorKind::LexerError);
    // Points at the first character past the limit, not the one after it.
    assert_eq!(err.location.column, MAX_REPETITIONS);
    assert_eq!(err.location.offset, MAX_REPETITIONS);
    assert_eq!(err.location.length, 1);

    let source = "-".repeat(MAX_REPETITIONS);
    assert_eq!(tokenize(&source, "loop.moa").unwrap().len(), MAX_REPETITIONS);
}

#[test]
fn test_repetition_guard_location_on_later_line() {
    let source = format!("1 +\n{}", "-".repeat(MAX_REPETITIONS + 1));
    let err = tokenize(&source, "loop.moa").unwrap_err();
    assert_eq!(err.kind, ErrorKind::LexerError);
    assert_eq!((err.location.line, err.location.column), (2, MAX_REPETITIONS));
}

#[test]
fn test_repetition_guard_resets_on_change() {
    let source = "- ".repeat(MAX_REPETITIONS);
    assert!(tokenize(&source, "alternating.moa").is_ok());
}
