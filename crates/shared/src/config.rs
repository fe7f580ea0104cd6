//! Scanner configuration
//!
//! Root directories are always passed in explicitly; nothing here reads the
//! process environment.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Marker for learner state directories, which never hold curriculum artifacts
pub const LEARNER_STATE_MARKER: &str = "learner_state";

/// Where and how to look for curriculum documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanConfig {
    /// Root directories, scanned in order
    #[serde(default)]
    pub roots: Vec<PathBuf>,

    /// Any file whose path contains one of these substrings is excluded before parsing
    #[serde(default = "default_exclude_markers")]
    pub exclude_markers: Vec<String>,

    /// File extensions treated as curriculum documents (without the dot)
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_exclude_markers() -> Vec<String> {
    vec![LEARNER_STATE_MARKER.to_string()]
}

fn default_extensions() -> Vec<String> {
    vec!["yaml".to_string()]
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            exclude_markers: default_exclude_markers(),
            extensions: default_extensions(),
        }
    }
}

impl ScanConfig {
    /// Scan the given roots with default exclusions and extensions
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            ..Self::default()
        }
    }

    /// Standard school layout: `<root>/domains` then `<root>/projects`
    pub fn for_school_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self::new(vec![root.join("domains"), root.join("projects")])
    }

    /// Load configuration from a YAML or JSON file
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        // YAML is a superset of JSON, so one parser covers both
        let config: Self = serde_yaml::from_str(&content)?;
        if config.extensions.is_empty() {
            return Err(crate::CurriculumError::Config(format!(
                "{}: at least one file extension is required",
                path.display()
            )));
        }
        Ok(config)
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.roots.push(root.into());
        self
    }

    /// Whether a path is explicitly excluded from scanning
    pub fn is_excluded(&self, path: &Path) -> bool {
        let rendered = path.to_string_lossy();
        self.exclude_markers
            .iter()
            .any(|marker| rendered.contains(marker.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScanConfig::new(vec![PathBuf::from("content")]);
        assert_eq!(config.exclude_markers, vec!["learner_state"]);
        assert_eq!(config.extensions, vec!["yaml"]);
    }

    #[test]
    fn test_school_root_layout() {
        let config = ScanConfig::for_school_root("/srv/school");
        assert_eq!(
            config.roots,
            vec![PathBuf::from("/srv/school/domains"), PathBuf::from("/srv/school/projects")]
        );
    }

    #[test]
    fn test_config_parse() {
        let json = r#"{
            "roots": ["school/domains", "school/projects"],
            "extensions": ["yaml", "yml"]
        }"#;

        let config: ScanConfig = serde_yaml::from_str(json).unwrap();
        assert_eq!(config.roots.len(), 2);
        assert_eq!(config.extensions, vec!["yaml", "yml"]);
        assert_eq!(config.exclude_markers, vec!["learner_state"]);
    }

    #[test]
    fn test_from_file_rejects_empty_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.yaml");
        std::fs::write(&path, "roots: [a]\nextensions: []\n").unwrap();

        let err = ScanConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, crate::CurriculumError::Config(_)));
    }

    #[test]
    fn test_exclusion() {
        let config = ScanConfig::default();
        assert!(config.is_excluded(Path::new("school/learner_state/local/state.yaml")));
        assert!(!config.is_excluded(Path::new("school/domains/computing/module.yaml")));
    }
}
