//! curriculum validate command

use clap::Args;
use console::style;
use shared::ContentKind;
use std::path::PathBuf;
use validation::{ValidationContext, ValidationPipeline};

#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// Generated artifact text (markdown)
    pub file: PathBuf,

    /// Id of the curriculum node the artifact was generated for
    #[arg(short, long)]
    pub target_id: String,

    /// Artifact kind (assignment, module, campaign, track)
    #[arg(short, long, default_value = "assignment")]
    pub kind: ContentKind,

    /// Fail instead of warning when validation does not pass
    #[arg(long)]
    pub strict: bool,
}

impl ValidateCommand {
    pub fn run(&self, json: bool) -> anyhow::Result<()> {
        let content = std::fs::read_to_string(&self.file)?;
        let context = ValidationContext::new(&self.target_id);
        let report = ValidationPipeline::standard().run(self.kind, &content, &context);

        if json {
            super::print_json(&report)?;
        } else {
            for result in &report.results {
                let mark = if result.passed { style("✓").green() } else { style("✗").red() };
                println!("{} {}", mark, result.name);
                for reason in &result.reasons {
                    println!("    {}", reason);
                }
            }
            if !report.passed {
                println!(
                    "{}",
                    style(format!("Warning: {} failed validation", self.file.display())).yellow()
                );
            }
        }

        if self.strict && !report.passed {
            anyhow::bail!("validation failed: {}", report.reasons().join("; "));
        }
        Ok(())
    }
}
