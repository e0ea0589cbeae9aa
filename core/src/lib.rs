//! Front end and bytecode emitter for the Moa expression language.
//!
//! text → [`lexer`] → tokens → [`parser`] → [`ast::Expr`] →
//! [`compiler`] → [`vm::Bytecode`] → [`vm::disassemble`]

pub mod api;
pub mod ast;
pub mod compiler;
pub mod diagnostics;
pub mod errors;
pub mod lexer;
pub mod parser;
pub mod types;
pub mod visitor;
pub mod vm;

pub use errors::{Error, ErrorKind, Location, Phase};
