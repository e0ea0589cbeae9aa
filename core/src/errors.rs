//! The diagnostic record produced by every phase of the pipeline.
//!
//! A compilation unit fails on its first error. The record carries enough
//! context to point at the offending source: the file and position, the
//! quoted source line, the phase that raised it, and the chain of internal
//! stages that were active at the time.

use std::fmt;
use std::sync::Arc;

use crate::diagnostics::Report;

/// Classification of a compilation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Lexical or structural malformation of the source.
    SyntaxError,
    /// An operator applied to operand types it has no instruction for.
    TypeMismatchError,
    /// The lexer's runaway guard tripped.
    LexerError,
    /// Caller-facing failure outside the source text (e.g. a missing file).
    CompilerError,
}

impl ErrorKind {
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::SyntaxError => "SyntaxError",
            ErrorKind::TypeMismatchError => "TypeMismatchError",
            ErrorKind::LexerError => "LexerError",
            ErrorKind::CompilerError => "CompilerError",
        }
    }

    /// Short code used by structured renderers.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::SyntaxError => "E001",
            ErrorKind::TypeMismatchError => "E002",
            ErrorKind::LexerError => "E003",
            ErrorKind::CompilerError => "E004",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The pipeline stage that raised an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Lexer,
    Parser,
    Compiler,
    /// The command-line driver.
    Driver,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Lexer => "Lexer",
            Phase::Parser => "Parser",
            Phase::Compiler => "Compiler",
            Phase::Driver => "moac",
        })
    }
}

/// A position in a source file.
///
/// `line` is 1-based; a line of 0 means the location names a file but no
/// position inside it. `column` is 0-based and counted in characters.
/// `offset` is the character offset of the first covered character in the
/// whole source, for renderers that work with spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub file: Arc<str>,
    pub line: usize,
    pub column: usize,
    pub length: usize,
    pub offset: usize,
    pub source_line: Arc<str>,
}

impl Location {
    /// A location that names a file without pointing into it.
    pub fn file_only(file: impl Into<Arc<str>>) -> Self {
        Self {
            file: file.into(),
            line: 0,
            column: 0,
            length: 0,
            offset: 0,
            source_line: Arc::from(""),
        }
    }

    pub fn has_position(&self) -> bool {
        self.line > 0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_position() {
            write!(f, "{}:{}:{}", self.file, self.line, self.column)
        } else {
            f.write_str(&self.file)
        }
    }
}

/// A terminal compilation failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("[{kind}] {message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
    pub location: Location,
    pub phase: Phase,
    /// Stages active when the error was raised, outermost first.
    pub trail: Vec<&'static str>,
}

impl Error {
    pub fn new(
        kind: ErrorKind,
        message: impl Into<String>,
        location: Location,
        phase: Phase,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            location,
            phase,
            trail: Vec::new(),
        }
    }

    pub fn with_trail(mut self, trail: Vec<&'static str>) -> Self {
        self.trail = trail;
        self
    }

    /// Renders the full caret diagram for this error.
    pub fn report(&self) -> Report<'_> {
        Report::new(self)
    }
}
