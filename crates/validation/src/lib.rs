//! # Curriculum Validation
//!
//! Checks a generated artifact's text before it is accepted. Checks are
//! independent and never consult the registry.
//!
//! ## Components
//!
//! - `Check` - A single named check
//! - `StructuralCheck` - Required assignment sections
//! - `VerificationCheck` - Presence of a runnable verification artifact
//! - `ValidationPipeline` - Runs every check and aggregates reasons

pub mod check;
pub mod pipeline;
pub mod structural;
pub mod verification;

pub use check::{is_declined, Check, CheckResult, ValidationContext};
pub use pipeline::{PipelineReport, ValidationPipeline};
pub use structural::StructuralCheck;
pub use verification::VerificationCheck;
