//! LearnerProfile - What a learner already holds
//!
//! Learner state lives outside the curriculum (and is excluded from scans).
//! Competence is recorded on three tiers: self-reported claims, practiced
//! assignments and exam-verified competencies. A competency counts as held
//! at any tier.

use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::path::Path;

/// A learner's competence record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LearnerProfile {
    /// Tier 1: self-reported, unverified
    pub tier_1_claims: Vec<String>,
    /// Tier 2: submitted assignments
    pub tier_2_practiced: BTreeMap<String, serde_yaml::Value>,
    /// Tier 3: exam-proven
    pub tier_3_verified: BTreeMap<String, serde_yaml::Value>,
    /// Free-form description of prior knowledge
    pub knowledge: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawProfile {
    #[serde(default)]
    tier_1_claims: Option<Vec<String>>,
    #[serde(default)]
    tier_2_practiced: Option<BTreeMap<String, serde_yaml::Value>>,
    #[serde(default)]
    tier_3_verified: Option<BTreeMap<String, serde_yaml::Value>>,
    #[serde(default, deserialize_with = "knowledge_text")]
    knowledge: Option<String>,
    /// Older state files list claims under this key
    #[serde(default)]
    competencies: Option<Vec<String>>,
}

/// `knowledge` may be a single string or a list of lines
fn knowledge_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Knowledge {
        Text(String),
        Lines(Vec<String>),
    }

    Ok(Option::<Knowledge>::deserialize(deserializer)?.map(|k| match k {
        Knowledge::Text(text) => text,
        Knowledge::Lines(lines) => lines.join("\n"),
    }))
}

impl From<RawProfile> for LearnerProfile {
    fn from(raw: RawProfile) -> Self {
        let mut tier_1_claims = raw.tier_1_claims.unwrap_or_default();
        if tier_1_claims.is_empty() {
            tier_1_claims = raw.competencies.unwrap_or_default();
        }

        Self {
            tier_1_claims,
            tier_2_practiced: raw.tier_2_practiced.unwrap_or_default(),
            tier_3_verified: raw.tier_3_verified.unwrap_or_default(),
            knowledge: raw.knowledge,
        }
    }
}

impl LearnerProfile {
    /// Parse a learner state document; an empty document is a beginner
    pub fn from_yaml(content: &str) -> shared::Result<Self> {
        let raw: Option<RawProfile> = serde_yaml::from_str(content)?;
        Ok(raw.map(Self::from).unwrap_or_default())
    }

    /// Load a learner state file
    pub fn load(path: &Path) -> shared::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Check if a competency is held at any tier
    pub fn has_competency(&self, competency: &str) -> bool {
        self.tier_3_verified.contains_key(competency)
            || self.tier_2_practiced.contains_key(competency)
            || self.tier_1_claims.iter().any(|c| c == competency)
    }

    /// No competence recorded on any tier
    pub fn is_beginner(&self) -> bool {
        self.tier_1_claims.is_empty() && self.tier_2_practiced.is_empty() && self.tier_3_verified.is_empty()
    }
}
