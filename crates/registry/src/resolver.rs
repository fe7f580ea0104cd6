//! DependencyResolver - Unmet requirements and structural closure
//!
//! Resolution is one hop. A requirement is satisfied when it names a module
//! in the registry or appears in some module's `produces` list. Whether the
//! producing module's own requirements are satisfiable is not followed; each
//! artifact is checked against the registry on its own.

use crate::learner::LearnerProfile;
use crate::registry::CurriculumRegistry;
use serde::Serialize;
use shared::{ArtifactKind, ArtifactNotFoundError, CompetencyId, CurriculumError};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Registry-wide closure diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosureReport {
    /// Every unmet requirement across the registry
    pub total_missing: BTreeSet<String>,
    /// Unmet requirements per artifact id; artifacts with none are omitted
    pub per_artifact: BTreeMap<String, Vec<String>>,
}

impl ClosureReport {
    /// A registry is closed when nothing is missing
    pub fn is_closed(&self) -> bool {
        self.total_missing.is_empty()
    }
}

/// A reference from one artifact to another that is not in the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DanglingReference {
    pub from_kind: ArtifactKind,
    pub from_id: String,
    pub to_kind: ArtifactKind,
    pub to_id: String,
}

/// A declared competency that does not have the standard id shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetencyViolation {
    pub artifact_kind: ArtifactKind,
    pub artifact_id: String,
    /// `requires` or `produces`
    pub field: &'static str,
    pub competency: String,
    pub reason: String,
}

/// Resolves requirements against a registry snapshot
#[derive(Debug)]
pub struct DependencyResolver<'r> {
    registry: &'r CurriculumRegistry,
    /// Union of every module's `produces`
    produced: HashSet<&'r str>,
}

impl<'r> DependencyResolver<'r> {
    /// Create a resolver over a registry
    pub fn new(registry: &'r CurriculumRegistry) -> Self {
        let produced = registry
            .modules()
            .flat_map(|m| m.produces.iter().map(String::as_str))
            .collect();

        Self { registry, produced }
    }

    pub fn registry(&self) -> &'r CurriculumRegistry {
        self.registry
    }

    /// Whether a requirement is met by a module id or a produced competency
    pub fn is_satisfied(&self, requirement: &str) -> bool {
        self.registry.module(requirement).is_some() || self.produced.contains(requirement)
    }

    /// Requirements of a module, or of a campaign when no module has the id
    fn requirements_of(&self, artifact_id: &str) -> Option<&'r [String]> {
        if let Some(module) = self.registry.module(artifact_id) {
            return Some(module.requires.as_slice());
        }
        self.registry.campaign(artifact_id).map(|c| c.requires.as_slice())
    }

    /// Unmet requirements of a module or campaign, in declaration order
    ///
    /// Returns an empty list for an unknown id. Use
    /// [`try_unmet_requirements`](Self::try_unmet_requirements) to tell the
    /// two cases apart.
    pub fn unmet_requirements(&self, artifact_id: &str) -> Vec<String> {
        self.try_unmet_requirements(artifact_id).unwrap_or_default()
    }

    /// Unmet requirements of a module or campaign, failing on an unknown id
    pub fn try_unmet_requirements(&self, artifact_id: &str) -> shared::Result<Vec<String>> {
        let requires = self.requirements_of(artifact_id).ok_or_else(|| {
            CurriculumError::from(ArtifactNotFoundError {
                id: artifact_id.to_string(),
                searched: vec![ArtifactKind::Module, ArtifactKind::Campaign],
            })
        })?;

        Ok(requires
            .iter()
            .filter(|req| !self.is_satisfied(req))
            .cloned()
            .collect())
    }

    /// Check every module and campaign in the registry
    pub fn closure_report(&self) -> ClosureReport {
        let ids: BTreeSet<&str> = self
            .registry
            .modules()
            .map(|m| m.id.as_str())
            .chain(self.registry.campaigns().map(|c| c.id.as_str()))
            .collect();

        let mut report = ClosureReport::default();
        for id in ids {
            let missing = self.unmet_requirements(id);
            if missing.is_empty() {
                continue;
            }
            report.total_missing.extend(missing.iter().cloned());
            report.per_artifact.insert(id.to_string(), missing);
        }
        report
    }

    /// Campaign → module and track → campaign references with no target
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        let mut dangling = Vec::new();

        for campaign in self.registry.campaigns() {
            for module_ref in &campaign.modules {
                if self.registry.module(module_ref.id()).is_none() {
                    dangling.push(DanglingReference {
                        from_kind: ArtifactKind::Campaign,
                        from_id: campaign.id.clone(),
                        to_kind: ArtifactKind::Module,
                        to_id: module_ref.id().to_string(),
                    });
                }
            }
        }

        for track in self.registry.tracks() {
            for campaign_ref in &track.campaigns {
                if self.registry.campaign(campaign_ref.id()).is_none() {
                    dangling.push(DanglingReference {
                        from_kind: ArtifactKind::Track,
                        from_id: track.id.clone(),
                        to_kind: ArtifactKind::Campaign,
                        to_id: campaign_ref.id().to_string(),
                    });
                }
            }
        }

        dangling
    }

    /// Declared competencies that do not have the standard id shape
    ///
    /// Advisory only: these ids still take part in resolution as opaque
    /// strings. Module ids used directly as requirements are not flagged.
    pub fn competency_audit(&self) -> Vec<CompetencyViolation> {
        let mut violations = Vec::new();

        let declared = self
            .registry
            .modules()
            .flat_map(|m| {
                let requires = m.requires.iter().map(move |c| (ArtifactKind::Module, &m.id, "requires", c));
                let produces = m.produces.iter().map(move |c| (ArtifactKind::Module, &m.id, "produces", c));
                requires.chain(produces)
            })
            .chain(
                self.registry
                    .campaigns()
                    .flat_map(|c| c.requires.iter().map(move |r| (ArtifactKind::Campaign, &c.id, "requires", r))),
            );

        for (kind, artifact_id, field, competency) in declared {
            if field == "requires" && self.registry.module(competency).is_some() {
                continue;
            }
            if let Err(e) = CompetencyId::parse(competency) {
                violations.push(CompetencyViolation {
                    artifact_kind: kind,
                    artifact_id: artifact_id.clone(),
                    field,
                    competency: competency.clone(),
                    reason: e.to_string(),
                });
            }
        }

        violations
    }

    /// Requirements of an artifact the learner does not hold yet
    ///
    /// Unknown ids yield an empty list, like
    /// [`unmet_requirements`](Self::unmet_requirements).
    pub fn learner_gaps(&self, artifact_id: &str, learner: &LearnerProfile) -> Vec<String> {
        self.requirements_of(artifact_id)
            .unwrap_or_default()
            .iter()
            .filter(|req| !learner.has_competency(req))
            .cloned()
            .collect()
    }
}
