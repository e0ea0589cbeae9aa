//! Double-dispatch traversal over [`Expr`] trees.
//!
//! A visitor supplies one method per node variant and chooses its own
//! output type:
//! - `String` for debug renderings ([`DebugVisitor`], [`TreePrinter`])
//! - a source span for extent queries ([`ExtentVisitor`])
//! - a code fragment paired with its type for the bytecode compiler
//!
//! Visitors recurse into children themselves by calling [`Expr::accept`].

mod debug;
mod extent;
mod tree_printer;


pub use debug::DebugVisitor;
pub use extent::{ExtentVisitor, SourceSpan};
pub use tree_printer::TreePrinter;

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::lexer::Token;

pub trait Visitor {
    type Output;

    fn visit_int(&mut self, value: i64, token: &Token) -> Self::Output;

    fn visit_float(&mut self, value: f64, token: &Token) -> Self::Output;

    fn visit_unary(&mut self, op: UnaryOp, operand: &Expr, token: &Token) -> Self::Output;

    fn visit_binary(
        &mut self,
        op: BinaryOp,
        left: &Expr,
        right: &Expr,
        token: &Token,
    ) -> Self::Output;
}
