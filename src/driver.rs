//! File-level entry points used by the `moac` command.

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{Compilation, CompilationOptions, Error, ErrorKind, Location, Phase, compile_source};

/// Reads a source file as UTF-8.
///
/// Failures are reported as `CompilerError` against the file itself, with
/// no position.
pub fn read_source(path: &Path) -> Result<String, Error> {
    let display = path.display().to_string();
    std::fs::read_to_string(path).map_err(|err| {
        let message = match err.kind() {
            io::ErrorKind::NotFound => format!("No such file or directory: '{}'", display),
            _ => format!("Cannot read '{}': {}", display, err),
        };
        Error::new(
            ErrorKind::CompilerError,
            message,
            Location::file_only(display.as_str()),
            Phase::Driver,
        )
        .with_trail(vec!["compile"])
    })
}

/// Reads and compiles one source file.
pub fn compile_file(path: &Path, options: &CompilationOptions) -> Result<Compilation, Error> {
    let source = read_source(path)?;
    debug!(path = %path.display(), chars = source.chars().count(), "Read source");
    compile_source(&source, &path.display().to_string(), options)
}

/// `<source without extension>.mvm`
pub fn default_output_path(source: &Path) -> PathBuf {
    source.with_extension("mvm")
}
