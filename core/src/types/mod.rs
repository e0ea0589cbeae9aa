//! The two-member numeric type lattice and its promotion rules.

mod promotion;
mod types;

pub use promotion::{Promotion, promote};
pub use types::Type;
