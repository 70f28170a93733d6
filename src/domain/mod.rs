//! # Domain Layer
//!
//! Transcript models, error taxonomy and the alternation rules.
//! This layer is independent of external frameworks and infrastructure.

pub mod models;
pub mod services;

pub use models::*;
pub use services::*;
