//! Domain services containing the core conversation rules.

mod alternation;
mod error;

pub use alternation::*;
pub use error::*;
