use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::lexer::Token;
use crate::visitor::Visitor;

/// Renders a tree on one line, e.g.
/// `expr.Binary(expr1=expr.Int(value=1), op='+', expr2=expr.Float(value=2.5))`.
///
/// Positions are left out, so two trees render alike exactly when they have
/// the same shape, operators and values.
#[derive(Debug, Default)]
pub struct DebugVisitor;

impl DebugVisitor {
    pub fn render(expr: &Expr) -> String {
        expr.accept(&mut DebugVisitor)
    }
}

impl Visitor for DebugVisitor {
    type Output = String;

    fn visit_int(&mut self, value: i64, _token: &Token) -> String {
        format!("expr.Int(value={})", value)
    }

    fn visit_float(&mut self, value: f64, _token: &Token) -> String {
        format!("expr.Float(value={:?})", value)
    }

    fn visit_unary(&mut self, op: UnaryOp, operand: &Expr, _token: &Token) -> String {
        format!("expr.Unary(op='{}', expr={})", op, operand.accept(self))
    }

    fn visit_binary(&mut self, op: BinaryOp, left: &Expr, right: &Expr, _token: &Token) -> String {
        let left = left.accept(self);
        let right = right.accept(self);
        format!("expr.Binary(expr1={}, op='{}', expr2={})", left, op, right)
    }
}
