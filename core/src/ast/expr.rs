use std::fmt;

use crate::lexer::Token;
use crate::visitor::Visitor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Plus,
    Neg,
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Neg => "-",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// An arithmetic expression.
///
/// Every node keeps the token it was built from: the numeral for literals,
/// the operator for unary and binary nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Int {
        value: i64,
        token: Token,
    },
    Float {
        value: f64,
        token: Token,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
        token: Token,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
        token: Token,
    },
}

impl Expr {
    pub fn token(&self) -> &Token {
        match self {
            Expr::Int { token, .. }
            | Expr::Float { token, .. }
            | Expr::Unary { token, .. }
            | Expr::Binary { token, .. } => token,
        }
    }

    /// Dispatches to the visitor method for this variant.
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            Expr::Int { value, token } => visitor.visit_int(*value, token),
            Expr::Float { value, token } => visitor.visit_float(*value, token),
            Expr::Unary { op, operand, token } => visitor.visit_unary(*op, operand, token),
            Expr::Binary {
                op,
                left,
                right,
                token,
            } => visitor.visit_binary(*op, left, right, token),
        }
    }
}
