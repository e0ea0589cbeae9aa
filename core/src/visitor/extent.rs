use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::lexer::Token;
use crate::visitor::Visitor;

/// The stretch of source covered by the tokens of a subtree.
///
/// Parentheses are not part of the tree, so a parenthesized operand's
/// extent starts and ends inside its parentheses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceSpan {
    pub start_line: usize,
    pub start_column: usize,
    pub start_offset: usize,
    pub end_line: usize,
    pub end_column: usize,
    pub end_offset: usize,
}

impl SourceSpan {
    pub fn of(token: &Token) -> Self {
        Self {
            start_line: token.line,
            start_column: token.column,
            start_offset: token.offset,
            end_line: token.line,
            end_column: token.end_column(),
            end_offset: token.offset + token.length,
        }
    }

    pub fn merge(self, other: SourceSpan) -> Self {
        let (start_line, start_column, start_offset) = if other.start_offset < self.start_offset {
            (other.start_line, other.start_column, other.start_offset)
        } else {
            (self.start_line, self.start_column, self.start_offset)
        };
        let (end_line, end_column, end_offset) = if other.end_offset > self.end_offset {
            (other.end_line, other.end_column, other.end_offset)
        } else {
            (self.end_line, self.end_column, self.end_offset)
        };
        Self {
            start_line,
            start_column,
            start_offset,
            end_line,
            end_column,
            end_offset,
        }
    }

    pub fn is_single_line(&self) -> bool {
        self.start_line == self.end_line
    }

    /// Length in characters; only meaningful for single-line spans.
    pub fn length(&self) -> usize {
        self.end_column.saturating_sub(self.start_column)
    }
}

/// Computes the [`SourceSpan`] of a subtree.
#[derive(Debug, Default)]
pub struct ExtentVisitor;

impl ExtentVisitor {
    pub fn span(expr: &Expr) -> SourceSpan {
        expr.accept(&mut ExtentVisitor)
    }
}

impl Visitor for ExtentVisitor {
    type Output = SourceSpan;

    fn visit_int(&mut self, _value: i64, token: &Token) -> SourceSpan {
        SourceSpan::of(token)
    }

    fn visit_float(&mut self, _value: f64, token: &Token) -> SourceSpan {
        SourceSpan::of(token)
    }

    fn visit_unary(&mut self, _op: UnaryOp, operand: &Expr, token: &Token) -> SourceSpan {
        SourceSpan::of(token).merge(operand.accept(self))
    }

    fn visit_binary(&mut self, _op: BinaryOp, left: &Expr, right: &Expr, token: &Token) -> SourceSpan {
        let left = left.accept(self);
        let right = right.accept(self);
        SourceSpan::of(token).merge(left).merge(right)
    }
}
