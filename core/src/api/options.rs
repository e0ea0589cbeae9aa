//! Configuration options for compilation.

use crate::parser::DEFAULT_MAX_DEPTH;

/// Configuration options for compilation.
///
/// # Example
///
/// ```
/// use moa_core::api::CompilationOptions;
///
/// let options = CompilationOptions {
///     debug: true,
///     ..Default::default()
/// };
/// assert_eq!(options.max_depth, 64);
/// ```
#[derive(Debug, Clone)]
pub struct CompilationOptions {
    /// Emit an `ERROR_DATA` record before every division.
    ///
    /// Default: false
    pub debug: bool,

    /// Maximum nesting of operators and parentheses on any path through
    /// the expression.
    ///
    /// Default: 64
    pub max_depth: usize,
}

impl Default for CompilationOptions {
    fn default() -> Self {
        Self {
            debug: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
