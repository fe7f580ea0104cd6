//! # Curriculum Shared
//!
//! Common types used across the curriculum crates: the artifact data model,
//! competency id shape, scanner configuration and errors.

pub mod artifact;
pub mod competency;
pub mod config;
pub mod error;

// Re-exports
pub use artifact::*;
pub use competency::*;
pub use config::*;
pub use error::*;
