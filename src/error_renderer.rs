//! Rich error rendering using ariadne
//!
//! Errors that point into the source are rendered with the offending span
//! labelled inline. Errors without a position (a missing file, say) fall
//! back to the plain report.

use crate::Error;
use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use std::io::Write;

/// Render an error with color to stderr
///
/// # Example
/// ```no_run
/// use moa::{CompilationOptions, compile_source, render_error};
///
/// let source = "1 + * 2";
/// if let Err(e) = compile_source(source, "input.moa", &CompilationOptions::default()) {
///     render_error(&e, source);
/// }
/// ```
pub fn render_error(error: &Error, source: &str) {
    render_error_to_writer(error, source, &mut std::io::stderr(), true).ok();
}

/// Render an error to a specific writer
pub fn render_error_to(error: &Error, source: &str, writer: &mut dyn Write) -> std::io::Result<()> {
    render_error_to_writer(error, source, writer, true)
}

/// Render an error to a String
pub fn render_error_to_string(error: &Error, source: &str) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, source, &mut buf, true).ok();
    String::from_utf8_lossy(&buf).to_string()
}

/// Render an error to a String without color codes (useful for tests)
pub fn render_error_to_string_no_color(error: &Error, source: &str) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, source, &mut buf, false).ok();
    String::from_utf8_lossy(&buf).to_string()
}

fn render_error_to_writer(
    error: &Error,
    source: &str,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    let location = &error.location;
    if !location.has_position() {
        return writeln!(writer, "{}", error.report());
    }

    let file: &str = &location.file;
    let source_len = source.chars().count();
    let start = location.offset.min(source_len);
    let end = (location.offset + location.length.max(1)).min(source_len).max(start);
    let span = (file, start..end);

    let mut report = Report::build(ReportKind::Error, span.clone())
        .with_config(Config::default().with_color(use_color))
        .with_code(error.kind.code())
        .with_message(format!("[{}] {}", error.kind, error.message))
        .with_label(
            Label::new(span)
                .with_message(&error.message)
                .with_color(Color::Red),
        );

    // Trail frames as notes, innermost first
    if !error.trail.is_empty() {
        let frames: Vec<String> = error
            .trail
            .iter()
            .rev()
            .map(|frame| format!("{}.{}", error.phase, frame))
            .collect();
        report = report.with_note(format!("from {}", frames.join(" <- ")));
    }

    report.finish().write((file, Source::from(source)), &mut *writer)
}
