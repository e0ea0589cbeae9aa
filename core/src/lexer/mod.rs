//! Character-level scanner turning source text into [`Token`]s.

#[allow(clippy::module_inception)]
mod lexer;
mod token;

#[cfg(test)]
mod lexer_test;

pub use lexer::{MAX_REPETITIONS, tokenize};
pub use token::{Token, TokenGroup, TokenKind};
