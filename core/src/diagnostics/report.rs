use std::fmt;

use crate::errors::Error;

/// Plain-text rendering of an [`Error`]:
///
/// ```text
/// Error in 'input.moa:1:0' for the reason:
///   from 'Parser.term_expression'
///   from 'Parser.expression'
///   from 'Parser'
///     |
///   1 |  (1 + 2
///     |  ^
///     V
/// [SyntaxError] '(' was never closed
/// ```
///
/// Trail frames are listed innermost first. Errors that carry no source
/// position skip the quoted block.
pub struct Report<'e> {
    error: &'e Error,
}

impl<'e> Report<'e> {
    pub fn new(error: &'e Error) -> Self {
        Self { error }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let error = self.error;
        let location = &error.location;

        writeln!(f, "Error in '{}' for the reason:", location)?;
        for frame in error.trail.iter().rev() {
            writeln!(f, "  from '{}.{}'", error.phase, frame)?;
        }
        writeln!(f, "  from '{}'", error.phase)?;

        if location.has_position() {
            let gutter = " ".repeat(location.line.to_string().len());
            writeln!(f, "  {} |", gutter)?;
            writeln!(f, "  {} |  {}", location.line, location.source_line)?;
            writeln!(
                f,
                "  {} |  {}{}",
                gutter,
                " ".repeat(location.column),
                "^".repeat(location.length.max(1))
            )?;
            writeln!(f, "  {} V", gutter)?;
        }

        write!(f, "{}", error)
    }
}
