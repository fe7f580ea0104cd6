//! # Curriculum Registry
//!
//! Discovers curriculum artifacts on disk and answers dependency questions
//! about them.
//!
//! ## Components
//!
//! - `ArtifactScanner` - Recursive discovery and shape-based classification
//! - `CurriculumRegistry` - Read-only store keyed by kind and id
//! - `DependencyResolver` - Unmet requirements and structural closure
//! - `LearnerProfile` - Competencies a learner already holds

pub mod learner;
pub mod registry;
pub mod resolver;
pub mod scanner;

pub use learner::LearnerProfile;
pub use registry::{CurriculumRegistry, IdCollision, RegistrySummary};
pub use resolver::{ClosureReport, CompetencyViolation, DanglingReference, DependencyResolver};
pub use scanner::{classify, ArtifactScanner, FileOutcome, ScanOutput, ScanReport, Shape, SkipReason};
