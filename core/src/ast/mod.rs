//! Expression tree produced by the parser.

mod expr;

pub use expr::{BinaryOp, Expr, UnaryOp};
