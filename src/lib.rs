//! Moa - compiler front end for a small arithmetic expression language
//!
//! # Overview
//!
//! Moa turns expression source text into a compact, little-endian bytecode
//! for a stack-based virtual machine:
//!
//! - Integer and float literals with `+ - * / %` and unary signs
//! - Automatic Int to Float promotion; division always yields Float
//! - Optional debug records locating each divisor for run-time faults
//! - A disassembler that decodes the bytecode back into a listing
//!
//! # Quick Start
//!
//! ```
//! use moa::{CompilationOptions, Type, compile_source, disassemble};
//!
//! let compilation = compile_source("4 * (10 + (4 - 5)) / 2.5", "demo.moa", &CompilationOptions::default())
//!     .unwrap();
//! assert_eq!(compilation.ty, Type::Float);
//!
//! let listing = disassemble(&compilation.bytecode).unwrap();
//! assert_eq!(listing.last().map(|i| i.mnemonic()), Some("FLOAT_DIV"));
//! ```
//!
//! # Errors
//!
//! Every failure is a single [`Error`] carrying its position, the phase that
//! raised it and the internal call trail. [`Error::report`] renders the plain
//! caret diagram; [`render_error_to_string`] renders a richer report.

mod driver;
mod error_renderer;

pub use driver::{compile_file, default_output_path, read_source};
pub use error_renderer::{
    render_error, render_error_to, render_error_to_string, render_error_to_string_no_color,
};

// Re-export public API from moa_core
pub use moa_core::api::{Compilation, CompilationOptions, compile_source};
pub use moa_core::errors::{Error, ErrorKind, Location, Phase};

// Re-export the pipeline stages
pub use moa_core::ast::{self, BinaryOp, Expr, UnaryOp};
pub use moa_core::lexer::{self, Token, TokenKind, tokenize};
pub use moa_core::parser::{self, parse};
pub use moa_core::types::{self, Type};
pub use moa_core::visitor::{self, DebugVisitor, TreePrinter, Visitor};
pub use moa_core::vm::{self, Bytecode, DisassembleError, Listing, disassemble};
