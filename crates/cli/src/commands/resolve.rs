//! curriculum resolve / closure / gaps commands

use super::scan::RootArgs;
use clap::Args;
use console::style;
use registry::{DependencyResolver, LearnerProfile};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ResolveCommand {
    /// Module or campaign id
    pub id: String,

    #[command(flatten)]
    pub roots: RootArgs,
}

impl ResolveCommand {
    pub fn run(&self, json: bool) -> anyhow::Result<()> {
        let (registry, _) = self.roots.load()?;
        let resolver = DependencyResolver::new(&registry);
        let missing = resolver.try_unmet_requirements(&self.id)?;

        if json {
            return super::print_json(&serde_json::json!({
                "id": self.id,
                "unmet": missing,
            }));
        }

        if missing.is_empty() {
            println!("{} {}: all requirements met", style("✓").green(), self.id);
        } else {
            println!("{} {}: {} unmet requirement(s)", style("✗").red(), self.id, missing.len());
            for req in &missing {
                println!("  - {}", req);
            }
        }
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct ClosureCommand {
    #[command(flatten)]
    pub roots: RootArgs,

    /// Fail if the registry is not structurally closed
    #[arg(long)]
    pub strict: bool,
}

impl ClosureCommand {
    pub fn run(&self, json: bool) -> anyhow::Result<()> {
        let (registry, _) = self.roots.load()?;
        let resolver = DependencyResolver::new(&registry);
        let closure = resolver.closure_report();
        let dangling = resolver.dangling_references();
        let audit = resolver.competency_audit();

        if json {
            super::print_json(&serde_json::json!({
                "closed": closure.is_closed(),
                "closure": closure,
                "dangling": dangling,
                "competencyAudit": audit,
            }))?;
        } else {
            if closure.is_closed() {
                println!("{} Registry is structurally closed", style("✓").green());
            } else {
                println!(
                    "{} {} unresolved requirement(s)",
                    style("✗").red(),
                    closure.total_missing.len()
                );
                for (id, missing) in &closure.per_artifact {
                    println!("  {}", style(id).bold());
                    for req in missing {
                        println!("    - {}", req);
                    }
                }
            }

            for reference in &dangling {
                println!(
                    "{}",
                    style(format!(
                        "Warning: {} {} references missing {}: {}",
                        reference.from_kind, reference.from_id, reference.to_kind, reference.to_id
                    ))
                    .yellow()
                );
            }

            if !audit.is_empty() {
                println!("Competency ids with non-standard shape (advisory):");
                for violation in &audit {
                    println!(
                        "  - {} ({} {}): {}",
                        violation.competency, violation.artifact_id, violation.field, violation.reason
                    );
                }
            }
        }

        if self.strict && !closure.is_closed() {
            anyhow::bail!("registry is not structurally closed");
        }
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct GapsCommand {
    /// Module or campaign id
    pub id: String,

    /// Learner state file
    #[arg(long, value_name = "FILE")]
    pub learner: PathBuf,

    #[command(flatten)]
    pub roots: RootArgs,
}

impl GapsCommand {
    pub fn run(&self, json: bool) -> anyhow::Result<()> {
        let (registry, _) = self.roots.load()?;
        let resolver = DependencyResolver::new(&registry);
        // Fail early on an unknown id instead of reporting no gaps
        resolver.try_unmet_requirements(&self.id)?;

        let learner = LearnerProfile::load(&self.learner)?;
        let gaps = resolver.learner_gaps(&self.id, &learner);

        if json {
            return super::print_json(&serde_json::json!({
                "id": self.id,
                "gaps": gaps,
            }));
        }

        if gaps.is_empty() {
            println!("{} learner holds every requirement of {}", style("✓").green(), self.id);
        } else {
            println!("Learner is missing {} requirement(s) of {}:", gaps.len(), self.id);
            for gap in &gaps {
                println!("  - {}", gap);
            }
        }
        Ok(())
    }
}
