use std::sync::Arc;

use tracing::{debug, trace};

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::diagnostics::Trail;
use crate::errors::{Error, ErrorKind, Phase};
use crate::lexer::{Token, TokenKind};
use crate::types::Type;

/// Nesting allowed by [`parse`], counting operators and parentheses on the
/// deepest path. Code generation, the visitors and dropping the tree all
/// recurse once per level.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// A parsed subtree with the nesting depth it occupies.
#[derive(Debug)]
pub(crate) struct Parsed {
    pub(crate) expr: Expr,
    pub(crate) depth: usize,
}

/// Parses a token stream into a single expression.
///
/// The whole stream must be consumed; trailing line breaks are allowed.
pub fn parse(tokens: Vec<Token>, file: &str) -> Result<Expr, Error> {
    parse_with_max_depth(tokens, file, DEFAULT_MAX_DEPTH)
}

pub fn parse_with_max_depth(
    tokens: Vec<Token>,
    file: &str,
    max_depth: usize,
) -> Result<Expr, Error> {
    Parser::new(tokens, file).with_max_depth(max_depth).parse()
}

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Stands in for every position past the last token.
    eof: Token,
    trail: Trail,
    open_parens: usize,
    max_depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>, file: &str) -> Self {
        let eof = match tokens.last() {
            Some(last) => Token {
                kind: TokenKind::Eof,
                value: String::new(),
                length: 1,
                column: last.end_column(),
                line: last.line,
                offset: last.offset + last.length,
                source_line: last.source_line.clone(),
                file: last.file.clone(),
            },
            None => Token {
                kind: TokenKind::Eof,
                value: String::new(),
                length: 1,
                column: 0,
                line: 1,
                offset: 0,
                source_line: Arc::from(""),
                file: Arc::from(file),
            },
        };

        Self {
            tokens,
            pos: 0,
            eof,
            trail: Trail::new(),
            open_parens: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Number of rule frames currently on the call trail. Zero between calls.
    pub fn trail_depth(&self) -> usize {
        self.trail.depth()
    }

    /// Parses one expression followed by the end of the stream.
    pub fn parse(&mut self) -> Result<Expr, Error> {
        self.rule("parse", |p| {
            let parsed = p.expression()?;
            while p.look(&[TokenKind::Newline]) {
                p.advance();
            }
            p.expect(&[TokenKind::Eof])?;
            debug!(
                tokens = p.tokens.len(),
                root = %parsed.expr.token().kind,
                depth = parsed.depth,
                "Parsed expression"
            );
            Ok(parsed.expr)
        })
    }

    pub(crate) fn expression(&mut self) -> Result<Parsed, Error> {
        self.rule("expression", |p| p.term_expression())
    }

    pub(crate) fn term_expression(&mut self) -> Result<Parsed, Error> {
        self.rule("term_expression", |p| {
            let mut left = p.factor_expression()?;
            loop {
                let op = match p.current().kind {
                    TokenKind::Plus => BinaryOp::Add,
                    TokenKind::Minus => BinaryOp::Sub,
                    _ => break,
                };
                let token = p.advance();
                let right = p.factor_expression()?;
                left = p.binary(op, left, right, token)?;
            }
            Ok(left)
        })
    }

    pub(crate) fn factor_expression(&mut self) -> Result<Parsed, Error> {
        self.rule("factor_expression", |p| {
            let mut left = p.unary_expression()?;
            loop {
                let op = match p.current().kind {
                    TokenKind::Multiply => BinaryOp::Mul,
                    TokenKind::Divide => BinaryOp::Div,
                    TokenKind::Modulo => BinaryOp::Mod,
                    _ => break,
                };
                let token = p.advance();
                let right = p.unary_expression()?;
                left = p.binary(op, left, right, token)?;
            }
            Ok(left)
        })
    }

    pub(crate) fn unary_expression(&mut self) -> Result<Parsed, Error> {
        self.rule("unary_expression", |p| {
            let op = match p.current().kind {
                TokenKind::Plus => UnaryOp::Plus,
                TokenKind::Minus => UnaryOp::Neg,
                _ => return p.primary_expression(),
            };
            let token = p.advance();
            let operand = p.primary_expression()?;
            let depth = p.nest(operand.depth + 1, &token)?;
            Ok(Parsed {
                expr: Expr::Unary {
                    op,
                    operand: Box::new(operand.expr),
                    token,
                },
                depth,
            })
        })
    }

    pub(crate) fn primary_expression(&mut self) -> Result<Parsed, Error> {
        self.rule("primary_expression", |p| {
            let token = p.expect(&[TokenKind::Number, TokenKind::LParen])?;
            if token.kind == TokenKind::Number {
                return Ok(Parsed {
                    expr: p.literal(token)?,
                    depth: 0,
                });
            }

            // Checked on the way down so the parser's own recursion stays bounded.
            if p.open_parens >= p.max_depth {
                return Err(p.depth_error(&token));
            }
            p.open_parens += 1;
            let inner = p.expression().and_then(|inner| {
                p.expect(&[TokenKind::RParen])?;
                Ok(inner)
            });
            p.open_parens -= 1;
            let inner = inner?;
            let depth = p.nest(inner.depth + 1, &token)?;
            Ok(Parsed {
                expr: inner.expr,
                depth,
            })
        })
    }

    fn binary(
        &self,
        op: BinaryOp,
        left: Parsed,
        right: Parsed,
        token: Token,
    ) -> Result<Parsed, Error> {
        let depth = self.nest(left.depth.max(right.depth) + 1, &token)?;
        Ok(Parsed {
            expr: Expr::Binary {
                op,
                left: Box::new(left.expr),
                right: Box::new(right.expr),
                token,
            },
            depth,
        })
    }

    /// Accepts `depth` for a node rooted at `token` if it is within the limit.
    fn nest(&self, depth: usize, token: &Token) -> Result<usize, Error> {
        if depth > self.max_depth {
            return Err(self.depth_error(token));
        }
        Ok(depth)
    }

    fn depth_error(&self, token: &Token) -> Error {
        self.error(
            format!(
                "Expression nesting depth exceeds maximum of {} levels",
                self.max_depth
            ),
            token,
        )
    }

    /// Consumes the current token if it is one of `kinds`.
    pub(crate) fn expect(&mut self, kinds: &[TokenKind]) -> Result<Token, Error> {
        self.rule("expect", |p| {
            if p.look(kinds) {
                return Ok(p.advance());
            }
            let expected = kinds
                .iter()
                .map(|kind| kind.name())
                .collect::<Vec<_>>()
                .join(", ");
            let message = format!(
                "Expected {}{}, got {}",
                if kinds.len() > 1 { "one of " } else { "" },
                expected,
                p.current().kind
            );
            let at = p.current().clone();
            Err(p.error(message, &at))
        })
    }

    fn literal(&self, token: Token) -> Result<Expr, Error> {
        match Type::of_numeral(&token.value) {
            Type::Int => match token.value.parse::<i64>() {
                Ok(value) => Ok(Expr::Int { value, token }),
                Err(_) => Err(self.error(
                    format!("Integer literal '{}' is out of range", token.value),
                    &token,
                )),
            },
            Type::Float => match token.value.parse::<f64>() {
                Ok(value) => Ok(Expr::Float { value, token }),
                Err(_) => Err(self.error(
                    format!("Invalid number literal '{}'", token.value),
                    &token,
                )),
            },
        }
    }

    /// Runs `f` with `name` on the trail, popping it on every exit.
    fn rule<T>(
        &mut self,
        name: &'static str,
        f: impl FnOnce(&mut Self) -> Result<T, Error>,
    ) -> Result<T, Error> {
        trace!(rule = name, pos = self.pos, "Enter");
        self.trail.push(name);
        let result = f(self);
        self.trail.pop();
        result
    }

    fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    fn look(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.current().kind)
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn error(&self, message: String, at: &Token) -> Error {
        Error::new(ErrorKind::SyntaxError, message, at.location(), Phase::Parser)
            .with_trail(self.trail.snapshot())
    }
}
