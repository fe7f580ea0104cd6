//! CurriculumRegistry - Read-only snapshot of classified artifacts

use crate::scanner::{ArtifactScanner, ScanReport};
use serde::Serialize;
use shared::{Artifact, ArtifactKind, ArtifactRef, Campaign, Module, ScanConfig, Track};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::warn;

/// Two documents of the same kind declared the same id; the later one won
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdCollision {
    pub kind: ArtifactKind,
    pub id: String,
    /// Source of the artifact that was replaced
    pub previous: PathBuf,
    /// Source of the artifact now in the registry
    pub replacement: PathBuf,
}

/// Counts describing a registry
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrySummary {
    pub tracks: usize,
    pub campaigns: usize,
    pub modules: usize,
    pub collisions: usize,
    pub generated_at: String,
}

/// In-memory store of curriculum artifacts, keyed by id within each kind
///
/// Built once from a scan. There is no mutation API: to observe a changed
/// filesystem, build a new registry.
#[derive(Debug, Clone, Default)]
pub struct CurriculumRegistry {
    modules: BTreeMap<String, Module>,
    campaigns: BTreeMap<String, Campaign>,
    tracks: BTreeMap<String, Track>,
    collisions: Vec<IdCollision>,
}

impl CurriculumRegistry {
    /// Build a registry from artifacts in scan order
    ///
    /// Ids are unique per kind. When two artifacts of the same kind share an
    /// id, the later one replaces the earlier and an [`IdCollision`] is kept.
    pub fn from_artifacts(artifacts: impl IntoIterator<Item = Artifact>) -> Self {
        let mut registry = Self::default();

        for artifact in artifacts {
            let kind = artifact.kind();
            let id = artifact.id().to_string();
            let replacement = artifact.source().to_path_buf();

            let previous = match artifact {
                Artifact::Module(m) => registry.modules.insert(id.clone(), m).map(|p| p.source),
                Artifact::Campaign(c) => registry.campaigns.insert(id.clone(), c).map(|p| p.source),
                Artifact::Track(t) => registry.tracks.insert(id.clone(), t).map(|p| p.source),
            };

            if let Some(previous) = previous {
                warn!(
                    %kind,
                    id = %id,
                    previous = %previous.display(),
                    replacement = %replacement.display(),
                    "duplicate artifact id, last write wins"
                );
                registry.collisions.push(IdCollision {
                    kind,
                    id,
                    previous,
                    replacement,
                });
            }
        }

        registry
    }

    /// Scan the configured roots and build a registry
    pub fn scan(config: &ScanConfig) -> (Self, ScanReport) {
        let output = ArtifactScanner::new(config.clone()).scan();
        (Self::from_artifacts(output.artifacts), output.report)
    }

    /// Get an artifact by kind and id
    pub fn get(&self, kind: ArtifactKind, id: &str) -> Option<ArtifactRef<'_>> {
        match kind {
            ArtifactKind::Module => self.module(id).map(ArtifactRef::Module),
            ArtifactKind::Campaign => self.campaign(id).map(ArtifactRef::Campaign),
            ArtifactKind::Track => self.track(id).map(ArtifactRef::Track),
        }
    }

    pub fn module(&self, id: &str) -> Option<&Module> {
        self.modules.get(id)
    }

    pub fn campaign(&self, id: &str) -> Option<&Campaign> {
        self.campaigns.get(id)
    }

    pub fn track(&self, id: &str) -> Option<&Track> {
        self.tracks.get(id)
    }

    /// All modules, ordered by id
    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.values()
    }

    /// All campaigns, ordered by id
    pub fn campaigns(&self) -> impl Iterator<Item = &Campaign> {
        self.campaigns.values()
    }

    /// All tracks, ordered by id
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }

    /// Every artifact of one kind, ordered by id
    pub fn all(&self, kind: ArtifactKind) -> Vec<ArtifactRef<'_>> {
        match kind {
            ArtifactKind::Module => self.modules().map(ArtifactRef::Module).collect(),
            ArtifactKind::Campaign => self.campaigns().map(ArtifactRef::Campaign).collect(),
            ArtifactKind::Track => self.tracks().map(ArtifactRef::Track).collect(),
        }
    }

    /// Id collisions seen while building, in scan order
    pub fn collisions(&self) -> &[IdCollision] {
        &self.collisions
    }

    pub fn len(&self) -> usize {
        self.modules.len() + self.campaigns.len() + self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn summary(&self) -> RegistrySummary {
        RegistrySummary {
            tracks: self.tracks.len(),
            campaigns: self.campaigns.len(),
            modules: self.modules.len(),
            collisions: self.collisions.len(),
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
