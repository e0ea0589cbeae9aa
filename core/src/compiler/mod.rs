//! Bytecode compiler for Moa expressions.
//!
//! Type resolution and emission happen in the same bottom-up pass: every
//! node yields its resolved [`Type`](crate::types::Type) together with its
//! code fragment.
//!
//! ## Design
//!
//! - Implements [`Visitor`](crate::visitor::Visitor) over the expression tree
//! - Children are emitted before their parent (postfix order)
//! - Int operands are widened right after their own fragment
//! - Division always runs in floating point

mod bytecode;


pub use bytecode::{BytecodeCompiler, Compiled};
