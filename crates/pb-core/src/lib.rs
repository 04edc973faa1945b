//! pb-core: shared types, IDs, errors, configuration, and URL routing.
//!
//! This crate is the foundational dependency for the other pb-* crates,
//! providing typed record identifiers, a unified error type, the climb
//! time-of-day enum, field validation rules, named routes, and application
//! configuration.

pub mod climb;
pub mod config;
pub mod error;
pub mod fields;
pub mod ids;
pub mod urls;

// Re-export the most commonly used items at the crate root.
pub use climb::ClimbTime;
pub use error::{Error, Result};
pub use ids::*;
