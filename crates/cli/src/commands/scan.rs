//! curriculum scan command

use clap::Args;
use console::style;
use registry::{CurriculumRegistry, DependencyResolver, FileOutcome, ScanReport};
use shared::ScanConfig;
use std::path::PathBuf;

/// Where to find curriculum documents
#[derive(Debug, Clone, Default, Args)]
pub struct RootArgs {
    /// Directory to scan (repeatable, scanned in order)
    #[arg(long = "root", value_name = "DIR")]
    pub roots: Vec<PathBuf>,

    /// School content root; scans its domains/ and projects/ directories
    #[arg(long, value_name = "DIR")]
    pub school_root: Option<PathBuf>,

    /// Scan configuration file (YAML or JSON)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl RootArgs {
    /// Combine config file, school root and explicit roots, in that order
    pub fn to_config(&self) -> anyhow::Result<ScanConfig> {
        let mut config = match &self.config {
            Some(path) => ScanConfig::from_file(path)?,
            None => ScanConfig::default(),
        };

        if let Some(school_root) = &self.school_root {
            config.roots.extend(ScanConfig::for_school_root(school_root).roots);
        }
        config.roots.extend(self.roots.iter().cloned());

        if config.roots.is_empty() {
            anyhow::bail!("no scan roots given: pass --root, --school-root or --config");
        }
        Ok(config)
    }

    /// Scan and build a registry
    pub fn load(&self) -> anyhow::Result<(CurriculumRegistry, ScanReport)> {
        let config = self.to_config()?;
        Ok(CurriculumRegistry::scan(&config))
    }
}

#[derive(Debug, Args)]
pub struct ScanCommand {
    #[command(flatten)]
    pub roots: RootArgs,

    /// Fail if any file could not be parsed or the registry is not closed
    #[arg(long)]
    pub strict: bool,
}

impl ScanCommand {
    pub fn run(&self, json: bool) -> anyhow::Result<()> {
        let (registry, report) = self.roots.load()?;
        let resolver = DependencyResolver::new(&registry);
        let closure = resolver.closure_report();

        if json {
            super::print_json(&serde_json::json!({
                "summary": registry.summary(),
                "files": report.outcomes(),
                "collisions": registry.collisions(),
                "closure": closure,
            }))?;
        } else {
            let summary = registry.summary();
            println!();
            println!("=== Curriculum Registry Summary ===");
            println!("Tracks:    {}", summary.tracks);
            println!("Campaigns: {}", summary.campaigns);
            println!("Modules:   {}", summary.modules);

            for failure in report.failures() {
                if let FileOutcome::ParseError { path, reason } = failure {
                    println!(
                        "{}",
                        style(format!("Warning: Failed to load artifact at {}: {}", path.display(), reason)).yellow()
                    );
                }
            }

            for collision in registry.collisions() {
                println!(
                    "{}",
                    style(format!(
                        "Warning: duplicate {} id '{}': {} replaced {}",
                        collision.kind,
                        collision.id,
                        collision.replacement.display(),
                        collision.previous.display()
                    ))
                    .yellow()
                );
            }

            if closure.is_closed() {
                println!(
                    "{}",
                    style("Registry is structurally closed (all dependencies resolved).").green()
                );
            } else {
                println!(
                    "{}",
                    style(format!("Unresolved Dependencies: {}", closure.total_missing.len())).yellow()
                );
                for missing in &closure.total_missing {
                    println!("  - {}", missing);
                }
            }
            println!();
        }

        if self.strict && (report.has_failures() || !closure.is_closed()) {
            anyhow::bail!("curriculum scan found parse failures or unresolved dependencies");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_roots_is_an_error() {
        assert!(RootArgs::default().to_config().is_err());
    }

    #[test]
    fn test_root_order() {
        let args = RootArgs {
            roots: vec![PathBuf::from("extra")],
            school_root: Some(PathBuf::from("school")),
            config: None,
        };

        let config = args.to_config().unwrap();
        assert_eq!(
            config.roots,
            vec![
                PathBuf::from("school/domains"),
                PathBuf::from("school/projects"),
                PathBuf::from("extra"),
            ]
        );
    }

    #[test]
    fn test_config_file_roots_come_first() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.yaml");
        std::fs::write(&path, "roots: [from_file]\nexcludeMarkers: [drafts]\n").unwrap();

        let args = RootArgs {
            roots: vec![PathBuf::from("extra")],
            school_root: None,
            config: Some(path),
        };

        let config = args.to_config().unwrap();
        assert_eq!(config.roots, vec![PathBuf::from("from_file"), PathBuf::from("extra")]);
        assert_eq!(config.exclude_markers, vec!["drafts"]);
    }
}
