//! ArtifactScanner - Discover and classify curriculum documents
//!
//! Every YAML document under the configured roots is parsed into a generic
//! mapping and then classified by shape, never by file name. Classification
//! precedence is fixed and checked in this order:
//!
//! 1. `assignments` or `produces` present → Module
//! 2. `modules` and `sub_goal` present → Campaign
//! 3. `campaigns` and `goal` present → Track
//!
//! A document that satisfies more than one shape takes the first match.
//!
//! A failure in one file never aborts the scan: each file yields a
//! [`FileOutcome`] and all outcomes are collected into a [`ScanReport`].

use serde::Serialize;
use serde_yaml::{Mapping, Value};
use shared::{Artifact, ArtifactKind, Campaign, Module, ScanConfig, Track};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Shape of a parsed document, before typed decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Module,
    Campaign,
    Track,
    Unrecognized,
}

impl Shape {
    pub fn kind(&self) -> Option<ArtifactKind> {
        match self {
            Shape::Module => Some(ArtifactKind::Module),
            Shape::Campaign => Some(ArtifactKind::Campaign),
            Shape::Track => Some(ArtifactKind::Track),
            Shape::Unrecognized => None,
        }
    }
}

/// Classify a mapping by the keys it carries
pub fn classify(mapping: &Mapping) -> Shape {
    if mapping.contains_key("assignments") || mapping.contains_key("produces") {
        Shape::Module
    } else if mapping.contains_key("modules") && mapping.contains_key("sub_goal") {
        Shape::Campaign
    } else if mapping.contains_key("campaigns") && mapping.contains_key("goal") {
        Shape::Track
    } else {
        Shape::Unrecognized
    }
}

/// Why a parsed document was skipped without a warning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Top level is not a key/value mapping (includes empty files)
    NotAMapping,
    /// No usable `id` field
    MissingId,
    /// Has an id but matches no artifact shape
    Unrecognized,
}

/// Result of scanning a single file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FileOutcome {
    Loaded {
        path: PathBuf,
        kind: ArtifactKind,
        id: String,
    },
    ParseError {
        path: PathBuf,
        reason: String,
    },
    Skipped {
        path: PathBuf,
        reason: SkipReason,
    },
    Excluded {
        path: PathBuf,
    },
}

impl FileOutcome {
    pub fn path(&self) -> &Path {
        match self {
            FileOutcome::Loaded { path, .. }
            | FileOutcome::ParseError { path, .. }
            | FileOutcome::Skipped { path, .. }
            | FileOutcome::Excluded { path } => path,
        }
    }
}

/// Per-file outcomes of one scan, in scan order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    outcomes: Vec<FileOutcome>,
}

impl ScanReport {
    pub fn outcomes(&self) -> &[FileOutcome] {
        &self.outcomes
    }

    pub fn loaded(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Loaded { .. }))
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::ParseError { .. }))
    }

    pub fn skipped(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Skipped { .. }))
    }

    pub fn excluded(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Excluded { .. }))
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    fn push(&mut self, outcome: FileOutcome) {
        self.outcomes.push(outcome);
    }
}

/// Artifacts found by a scan plus the report describing every file
#[derive(Debug, Clone, Default)]
pub struct ScanOutput {
    /// Classified artifacts in scan order (duplicates not yet resolved)
    pub artifacts: Vec<Artifact>,
    pub report: ScanReport,
}

/// Artifact scanner
#[derive(Debug, Clone)]
pub struct ArtifactScanner {
    config: ScanConfig,
}

impl ArtifactScanner {
    /// Create a new ArtifactScanner
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan every configured root, in order
    pub fn scan(&self) -> ScanOutput {
        let mut output = ScanOutput::default();

        for root in &self.config.roots {
            if !root.exists() {
                debug!(root = %root.display(), "scan root does not exist, skipping");
                continue;
            }

            for path in self.discover(root, &mut output.report) {
                let (outcome, artifact) = self.scan_file(&path);
                if let Some(artifact) = artifact {
                    output.artifacts.push(artifact);
                }
                output.report.push(outcome);
            }
        }

        info!(
            artifacts = output.artifacts.len(),
            failures = output.report.failures().count(),
            "curriculum scan complete"
        );
        output
    }

    /// Find candidate documents below a root, sorted by path
    fn discover(&self, root: &Path, report: &mut ScanReport) -> Vec<PathBuf> {
        let escaped_root = glob::Pattern::escape(&root.to_string_lossy());
        let mut paths = Vec::new();

        for extension in &self.config.extensions {
            let pattern = format!("{}/**/*.{}", escaped_root, extension);
            let entries = match glob::glob(&pattern) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(pattern = %pattern, error = %e, "invalid scan pattern");
                    continue;
                }
            };

            for entry in entries {
                match entry {
                    Ok(path) if path.is_file() => paths.push(path),
                    Ok(_) => {}
                    Err(e) => {
                        warn!(path = %e.path().display(), error = %e, "failed to read directory entry");
                        report.push(FileOutcome::ParseError {
                            path: e.path().to_path_buf(),
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        paths.sort();
        paths.dedup();
        paths
    }

    /// Read, parse and classify one file
    pub fn scan_file(&self, path: &Path) -> (FileOutcome, Option<Artifact>) {
        if self.config.is_excluded(path) {
            debug!(path = %path.display(), "excluded from scan");
            return (FileOutcome::Excluded { path: path.to_path_buf() }, None);
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => return parse_error(path, e.to_string()),
        };

        let document: Value = match serde_yaml::from_str(&content) {
            Ok(document) => document,
            Err(e) => return parse_error(path, e.to_string()),
        };

        let Value::Mapping(mut mapping) = document else {
            return skipped(path, SkipReason::NotAMapping);
        };

        let Some(id) = extract_id(&mapping) else {
            return skipped(path, SkipReason::MissingId);
        };

        let shape = classify(&mapping);
        if shape == Shape::Unrecognized {
            return skipped(path, SkipReason::Unrecognized);
        }

        // Numeric ids are kept as their string form
        mapping.insert(Value::from("id"), Value::from(id.as_str()));

        match decode(shape, mapping, path) {
            Ok(Some(artifact)) => {
                debug!(path = %path.display(), kind = %artifact.kind(), id = %id, "loaded artifact");
                (
                    FileOutcome::Loaded {
                        path: path.to_path_buf(),
                        kind: artifact.kind(),
                        id,
                    },
                    Some(artifact),
                )
            }
            Ok(None) => skipped(path, SkipReason::Unrecognized),
            Err(e) => parse_error(path, format!("invalid {} document: {}", shape_name(shape), e)),
        }
    }
}

fn shape_name(shape: Shape) -> &'static str {
    shape.kind().map(|k| k.as_str()).unwrap_or("unrecognized")
}

/// A usable id is a non-empty string or a number
fn extract_id(mapping: &Mapping) -> Option<String> {
    match mapping.get("id")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn decode(shape: Shape, mapping: Mapping, path: &Path) -> Result<Option<Artifact>, serde_yaml::Error> {
    let value = Value::Mapping(mapping);
    let artifact = match shape {
        Shape::Module => {
            Artifact::Module(serde_yaml::from_value::<Module>(value)?.with_source(path))
        }
        Shape::Campaign => {
            Artifact::Campaign(serde_yaml::from_value::<Campaign>(value)?.with_source(path))
        }
        Shape::Track => Artifact::Track(serde_yaml::from_value::<Track>(value)?.with_source(path)),
        Shape::Unrecognized => return Ok(None),
    };
    Ok(Some(artifact))
}

fn parse_error(path: &Path, reason: String) -> (FileOutcome, Option<Artifact>) {
    warn!(path = %path.display(), reason = %reason, "failed to load artifact");
    (
        FileOutcome::ParseError {
            path: path.to_path_buf(),
            reason,
        },
        None,
    )
}

fn skipped(path: &Path, reason: SkipReason) -> (FileOutcome, Option<Artifact>) {
    debug!(path = %path.display(), ?reason, "skipped document");
    (
        FileOutcome::Skipped {
            path: path.to_path_buf(),
            reason,
        },
        None,
    )
}
