//! Recursive-descent parser for arithmetic expressions.
//!
//! ```text
//! expression := term
//! term       := factor ( ('+' | '-') factor )*
//! factor     := unary ( ('*' | '/' | '%') unary )*
//! unary      := ('+' | '-') primary | primary
//! primary    := NUMBER | '(' expression ')'
//! ```

#[allow(clippy::module_inception)]
mod parser;

pub use parser::{DEFAULT_MAX_DEPTH, Parser, parse, parse_with_max_depth};


#[cfg(test)]
mod precedence_test;
