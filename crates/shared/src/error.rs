//! Error types for the curriculum core
//!
//! Most failures in the core are reported as data (scan outcomes, unmet
//! requirement lists, validation reasons). The variants here cover the
//! remaining cases where an operation cannot produce a result at all.

use crate::ArtifactKind;
use thiserror::Error;

/// Error returned when an artifact id is not present in the registry
#[derive(Debug, Error)]
#[error("Artifact '{id}' not found. Searched: {}", .searched.iter().map(|k| k.as_str()).collect::<Vec<_>>().join(", "))]
pub struct ArtifactNotFoundError {
    pub id: String,
    /// Namespaces that were searched, in lookup order
    pub searched: Vec<ArtifactKind>,
}

/// General curriculum error type
#[derive(Debug, Error)]
pub enum CurriculumError {
    #[error(transparent)]
    ArtifactNotFound(#[from] ArtifactNotFoundError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CurriculumError>;
