//! Check trait and result types

use serde::Serialize;
use shared::ContentKind;
use std::collections::BTreeMap;

/// Markers an agent uses to decline producing content
pub const DECLINE_MARKERS: [&str; 2] = ["SKIP:", "REFUSE:"];

/// Content that opens with a decline marker is an intentional non-artifact
pub fn is_declined(content: &str) -> bool {
    DECLINE_MARKERS.iter().any(|m| content.starts_with(m))
}

/// What a check knows about the artifact besides its text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationContext {
    /// Identifier of the curriculum node the artifact was generated for
    pub target_id: String,
    /// Additional case information
    pub extra: BTreeMap<String, String>,
}

impl ValidationContext {
    pub fn new(target_id: impl Into<String>) -> Self {
        Self {
            target_id: target_id.into(),
            extra: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Whether one of the target id's dot-separated segments equals `domain`
    pub fn targets_domain(&self, domain: &str) -> bool {
        self.target_id.split('.').any(|segment| segment == domain)
    }
}

/// Outcome of one check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    /// Human-readable failure reasons; empty when passed
    pub reasons: Vec<String>,
}

impl CheckResult {
    pub fn pass(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            reasons: Vec::new(),
        }
    }

    /// Passes iff there are no reasons
    pub fn from_reasons(name: impl Into<String>, reasons: Vec<String>) -> Self {
        Self {
            name: name.into(),
            passed: reasons.is_empty(),
            reasons,
        }
    }
}

/// A single validation check over one artifact's text
pub trait Check: Send + Sync {
    /// Stable identifier reported in results
    fn name(&self) -> &'static str;

    fn validate(&self, kind: ContentKind, content: &str, context: &ValidationContext) -> CheckResult;
}
