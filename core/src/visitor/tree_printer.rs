use std::fmt::Write;

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::lexer::Token;
use crate::visitor::Visitor;

/// Indented multi-line rendering, one node per line with its position.
///
/// ```text
/// Binary '/' @1:19
///   Int 4 @1:0
///   Float 2.5 @1:21
/// ```
#[derive(Debug, Default)]
pub struct TreePrinter {
    depth: usize,
    out: String,
}

impl TreePrinter {
    pub fn render(expr: &Expr) -> String {
        let mut printer = TreePrinter::default();
        expr.accept(&mut printer);
        printer.out
    }

    fn line(&mut self, label: std::fmt::Arguments<'_>, token: &Token) {
        // Writing into a String cannot fail.
        let _ = writeln!(
            self.out,
            "{:indent$}{} @{}:{}",
            "",
            label,
            token.line,
            token.column,
            indent = self.depth * 2
        );
    }

    fn nested(&mut self, children: &[&Expr]) {
        self.depth += 1;
        for child in children {
            child.accept(self);
        }
        self.depth -= 1;
    }
}

impl Visitor for TreePrinter {
    type Output = ();

    fn visit_int(&mut self, value: i64, token: &Token) {
        self.line(format_args!("Int {}", value), token);
    }

    fn visit_float(&mut self, value: f64, token: &Token) {
        self.line(format_args!("Float {:?}", value), token);
    }

    fn visit_unary(&mut self, op: UnaryOp, operand: &Expr, token: &Token) {
        self.line(format_args!("Unary '{}'", op), token);
        self.nested(&[operand]);
    }

    fn visit_binary(&mut self, op: BinaryOp, left: &Expr, right: &Expr, token: &Token) {
        self.line(format_args!("Binary '{}'", op), token);
        self.nested(&[left, right]);
    }
}
