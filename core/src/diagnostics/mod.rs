//! Call-trail bookkeeping and plain-text rendering of compilation errors.

pub mod context;
mod report;

pub use context::Trail;
pub use report::Report;
