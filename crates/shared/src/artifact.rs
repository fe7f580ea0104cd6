//! Curriculum artifact types
//!
//! A curriculum is authored as YAML documents. Each document that carries an
//! `id` is classified by shape into one of three artifact variants:
//! Track → Campaign → Module. Assignments are referenced by modules and
//! validated as text elsewhere.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Kind of a classified curriculum document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Module,
    Campaign,
    Track,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Module => "module",
            ArtifactKind::Campaign => "campaign",
            ArtifactKind::Track => "track",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a piece of generated content handed to the validators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Track,
    Campaign,
    Module,
    Assignment,
}

impl std::str::FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "track" => Ok(ContentKind::Track),
            "campaign" => Ok(ContentKind::Campaign),
            "module" => Ok(ContentKind::Module),
            "assignment" => Ok(ContentKind::Assignment),
            other => Err(format!("unknown content kind '{}'", other)),
        }
    }
}

/// Reference to another artifact: either a bare id or an inline `{id, ...}` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference {
    Id(String),
    Inline(InlineReference),
}

/// Inline reference object, as written in track and campaign documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineReference {
    pub id: String,

    #[serde(default, deserialize_with = "scalar_text")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "scalar_text")]
    pub description: Option<String>,

    /// Module ids listed under an inline campaign entry; entries without an id are dropped
    #[serde(default, deserialize_with = "referenced_ids")]
    pub modules: Vec<String>,
}

impl Reference {
    /// The referenced artifact id
    pub fn id(&self) -> &str {
        match self {
            Reference::Id(id) => id,
            Reference::Inline(inline) => &inline.id,
        }
    }
}

impl From<&str> for Reference {
    fn from(id: &str) -> Self {
        Reference::Id(id.to_string())
    }
}

/// A module: the unit that requires and produces competencies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub id: String,

    #[serde(default, deserialize_with = "scalar_text")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "scalar_text")]
    pub description: Option<String>,

    /// Competencies a learner must hold before starting
    #[serde(default, deserialize_with = "null_as_empty")]
    pub requires: Vec<String>,

    /// Competencies a learner holds after finishing
    #[serde(default, deserialize_with = "null_as_empty")]
    pub produces: Vec<String>,

    /// Entries without a usable id are dropped; assignments play no part in resolution
    #[serde(default, deserialize_with = "identified_references")]
    pub assignments: Vec<Reference>,

    /// File the module was loaded from
    #[serde(skip)]
    pub source: PathBuf,
}

impl Module {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            description: None,
            requires: Vec::new(),
            produces: Vec::new(),
            assignments: Vec::new(),
            source: PathBuf::new(),
        }
    }

    pub fn with_requires(mut self, requires: Vec<String>) -> Self {
        self.requires = requires;
        self
    }

    pub fn with_produces(mut self, produces: Vec<String>) -> Self {
        self.produces = produces;
        self
    }

    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = source.into();
        self
    }

    pub fn produces_competency(&self, competency: &str) -> bool {
        self.produces.iter().any(|p| p == competency)
    }
}

/// A campaign: an ordered group of modules pursuing one sub-goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: String,

    #[serde(default, deserialize_with = "scalar_text")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "scalar_text")]
    pub description: Option<String>,

    /// Classification marker; its content is not interpreted
    #[serde(default)]
    pub sub_goal: serde_yaml::Value,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub modules: Vec<Reference>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub requires: Vec<String>,

    #[serde(skip)]
    pub source: PathBuf,
}

impl Campaign {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            description: None,
            sub_goal: serde_yaml::Value::Null,
            modules: Vec::new(),
            requires: Vec::new(),
            source: PathBuf::new(),
        }
    }

    pub fn with_modules(mut self, modules: Vec<Reference>) -> Self {
        self.modules = modules;
        self
    }

    pub fn with_requires(mut self, requires: Vec<String>) -> Self {
        self.requires = requires;
        self
    }

    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = source.into();
        self
    }
}

/// A track: the root of a curriculum, an ordered list of campaigns toward a goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,

    #[serde(default, deserialize_with = "scalar_text")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "scalar_text")]
    pub description: Option<String>,

    /// Classification marker; its content is not interpreted
    #[serde(default)]
    pub goal: serde_yaml::Value,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub campaigns: Vec<Reference>,

    #[serde(skip)]
    pub source: PathBuf,
}

impl Track {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            description: None,
            goal: serde_yaml::Value::Null,
            campaigns: Vec::new(),
            source: PathBuf::new(),
        }
    }

    pub fn with_campaigns(mut self, campaigns: Vec<Reference>) -> Self {
        self.campaigns = campaigns;
        self
    }

    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = source.into();
        self
    }
}

/// A classified curriculum artifact
#[derive(Debug, Clone, PartialEq)]
pub enum Artifact {
    Module(Module),
    Campaign(Campaign),
    Track(Track),
}

impl Artifact {
    pub fn kind(&self) -> ArtifactKind {
        match self {
            Artifact::Module(_) => ArtifactKind::Module,
            Artifact::Campaign(_) => ArtifactKind::Campaign,
            Artifact::Track(_) => ArtifactKind::Track,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Artifact::Module(m) => &m.id,
            Artifact::Campaign(c) => &c.id,
            Artifact::Track(t) => &t.id,
        }
    }

    pub fn source(&self) -> &std::path::Path {
        match self {
            Artifact::Module(m) => &m.source,
            Artifact::Campaign(c) => &c.source,
            Artifact::Track(t) => &t.source,
        }
    }

    /// Declared requirements; tracks declare none
    pub fn requires(&self) -> &[String] {
        match self {
            Artifact::Module(m) => &m.requires,
            Artifact::Campaign(c) => &c.requires,
            Artifact::Track(_) => &[],
        }
    }
}

/// Borrowed view of an artifact held by a registry
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArtifactRef<'a> {
    Module(&'a Module),
    Campaign(&'a Campaign),
    Track(&'a Track),
}

impl<'a> ArtifactRef<'a> {
    pub fn kind(&self) -> ArtifactKind {
        match self {
            ArtifactRef::Module(_) => ArtifactKind::Module,
            ArtifactRef::Campaign(_) => ArtifactKind::Campaign,
            ArtifactRef::Track(_) => ArtifactKind::Track,
        }
    }

    pub fn id(&self) -> &'a str {
        match self {
            ArtifactRef::Module(m) => &m.id,
            ArtifactRef::Campaign(c) => &c.id,
            ArtifactRef::Track(t) => &t.id,
        }
    }

    pub fn requires(&self) -> &'a [String] {
        match self {
            ArtifactRef::Module(m) => &m.requires,
            ArtifactRef::Campaign(c) => &c.requires,
            ArtifactRef::Track(_) => &[],
        }
    }
}

/// Treat an explicit YAML `null` (e.g. `requires:` with no value) as an empty list
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Keep scalar text fields as strings; anything else (lists, mappings) becomes `None`
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<serde_yaml::Value>::deserialize(deserializer)?
        .as_ref()
        .and_then(scalar_string))
}

fn scalar_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Id of a list entry written as a bare scalar or as an `{id, ...}` mapping
fn entry_id(value: &serde_yaml::Value) -> Option<String> {
    let id = match value {
        serde_yaml::Value::Mapping(mapping) => scalar_string(mapping.get("id")?)?,
        other => scalar_string(other)?,
    };
    (!id.trim().is_empty()).then_some(id)
}

fn entries<'de, D>(deserializer: D) -> Result<Vec<serde_yaml::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_yaml::Value>::deserialize(deserializer)? {
        Some(serde_yaml::Value::Sequence(items)) => items,
        _ => Vec::new(),
    })
}

/// Bare ids from a list of bare or inline entries
fn referenced_ids<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(entries(deserializer)?.iter().filter_map(entry_id).collect())
}

/// References from a list, dropping entries that carry no id
fn identified_references<'de, D>(deserializer: D) -> Result<Vec<Reference>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut references = Vec::new();
    for entry in entries(deserializer)? {
        let Some(id) = entry_id(&entry) else { continue };
        let reference = match entry {
            serde_yaml::Value::Mapping(mut mapping) => {
                mapping.insert("id".into(), id.into());
                serde_yaml::from_value(serde_yaml::Value::Mapping(mapping))
                    .map(Reference::Inline)
                    .map_err(<D::Error as serde::de::Error>::custom)?
            }
            _ => Reference::Id(id),
        };
        references.push(reference);
    }
    Ok(references)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_yaml_parsing() {
        let yaml = r#"
id: computing.python.basics
title: Python Basics
requires:
produces:
  - computing.python.basics.apply
assignments:
  - basics_01
  - id: basics_02
    title: Second
"#;

        let module: Module = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(module.id, "computing.python.basics");
        assert!(module.requires.is_empty());
        assert!(module.produces_competency("computing.python.basics.apply"));
        assert_eq!(module.assignments.len(), 2);
        assert_eq!(module.assignments[1].id(), "basics_02");
    }

    #[test]
    fn test_descriptive_fields_are_lenient() {
        let yaml = r#"
id: computing.games.g2048
title: 2048
description: [not, text]
produces: [computing.games.g2048.apply]
assignments:
  - title: Hello
  - 7
  - id: g2048_01
    title: 1
    modules: [a, {id: b}, {title: none}]
"#;

        let module: Module = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(module.title.as_deref(), Some("2048"));
        assert_eq!(module.description, None);
        let ids: Vec<&str> = module.assignments.iter().map(|a| a.id()).collect();
        assert_eq!(ids, vec!["7", "g2048_01"]);
        match &module.assignments[1] {
            Reference::Inline(inline) => {
                assert_eq!(inline.title.as_deref(), Some("1"));
                assert_eq!(inline.modules, vec!["a", "b"]);
            }
            Reference::Id(_) => panic!("expected inline reference"),
        }
    }

    #[test]
    fn test_graph_fields_stay_strict() {
        assert!(serde_yaml::from_str::<Module>("id: m\nproduces: {a: b}\n").is_err());
        assert!(serde_yaml::from_str::<Campaign>("id: c\nsub_goal: x\nmodules: 3\n").is_err());
    }

    #[test]
    fn test_campaign_mixed_module_references() {
        let yaml = r#"
id: proj.intro
sub_goal: Write a first script
modules:
  - computing.python.basics
  - id: computing.python.loops
    title: Loops
requires: [computing.python.basics.apply]
"#;

        let campaign: Campaign = serde_yaml::from_str(yaml).unwrap();
        let ids: Vec<&str> = campaign.modules.iter().map(|m| m.id()).collect();
        assert_eq!(ids, vec!["computing.python.basics", "computing.python.loops"]);
        assert_eq!(campaign.requires, vec!["computing.python.basics.apply"]);
    }

    #[test]
    fn test_track_inline_campaigns() {
        let yaml = r#"
id: track.python
goal: Become productive in Python
campaigns:
  - id: proj.intro
    title: Intro
    description: First steps
    modules: [computing.python.basics]
"#;

        let track: Track = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(track.campaigns[0].id(), "proj.intro");
        match &track.campaigns[0] {
            Reference::Inline(inline) => assert_eq!(inline.modules.len(), 1),
            Reference::Id(_) => panic!("expected inline reference"),
        }
    }

    #[test]
    fn test_artifact_accessors() {
        let artifact = Artifact::Campaign(
            Campaign::new("proj.intro").with_requires(vec!["a.b.c.apply".to_string()]),
        );
        assert_eq!(artifact.kind(), ArtifactKind::Campaign);
        assert_eq!(artifact.id(), "proj.intro");
        assert_eq!(artifact.requires(), ["a.b.c.apply".to_string()]);

        let track = Artifact::Track(Track::new("t"));
        assert!(track.requires().is_empty());
    }

    #[test]
    fn test_content_kind_from_str() {
        assert_eq!("Assignment".parse::<ContentKind>(), Ok(ContentKind::Assignment));
        assert!("lesson".parse::<ContentKind>().is_err());
    }

    #[test]
    fn test_artifact_kind_serialization() {
        let json = serde_json::to_string(&ArtifactKind::Campaign).unwrap();
        assert_eq!(json, "\"campaign\"");
    }
}
