//! Competency id shape
//!
//! A competency id names one unit of learnable skill as four dot-separated
//! segments, `domain.subdomain.concept.verb`, e.g.
//! `computing.networking.tcp_handshake.trace`. The verb is drawn from a
//! closed vocabulary.
//!
//! The shape is advisory: the registry accepts any string as a competency and
//! only the audit reports ids that do not conform.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

/// Verbs allowed as the last segment of a competency id
pub const ALLOWED_VERBS: [&str; 8] = [
    "identify",
    "trace",
    "construct",
    "transform",
    "predict",
    "diagnose",
    "formalize",
    "apply",
];

const COMPETENCY_ID_PATTERN: &str = r"^[a-z0-9_]+\.[a-z0-9_]+\.[a-z0-9_]+\.[a-z0-9_]+$";

fn competency_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(COMPETENCY_ID_PATTERN).expect("competency id pattern is valid"))
}

/// Why a string is not a well-formed competency id
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompetencyIdError {
    #[error("Invalid competency id '{0}': expected domain.subdomain.concept.verb")]
    Malformed(String),

    #[error("Invalid competency id '{id}': verb '{verb}' is not one of {}", ALLOWED_VERBS.join(", "))]
    UnknownVerb { id: String, verb: String },
}

/// A competency id that passed the shape check
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CompetencyId(String);

impl CompetencyId {
    /// Parse and check a competency id
    pub fn parse(raw: &str) -> Result<Self, CompetencyIdError> {
        if !competency_regex().is_match(raw) {
            return Err(CompetencyIdError::Malformed(raw.to_string()));
        }

        // The regex guarantees four segments
        let verb = raw.rsplit('.').next().unwrap_or_default();
        if !ALLOWED_VERBS.contains(&verb) {
            return Err(CompetencyIdError::UnknownVerb {
                id: raw.to_string(),
                verb: verb.to_string(),
            });
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn domain(&self) -> &str {
        self.segment(0)
    }

    pub fn verb(&self) -> &str {
        self.segment(3)
    }

    fn segment(&self, index: usize) -> &str {
        self.0.split('.').nth(index).unwrap_or_default()
    }
}

/// Whether a string has the competency id shape
pub fn is_valid_competency_id(raw: &str) -> bool {
    CompetencyId::parse(raw).is_ok()
}

impl fmt::Display for CompetencyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CompetencyId {
    type Error = CompetencyIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CompetencyId> for String {
    fn from(id: CompetencyId) -> Self {
        id.0
    }
}
