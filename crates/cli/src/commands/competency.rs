//! curriculum competency command

use clap::Args;
use console::style;
use shared::CompetencyId;

#[derive(Debug, Args)]
pub struct CompetencyCommand {
    /// Competency ids to check
    #[arg(required = true)]
    pub ids: Vec<String>,
}

impl CompetencyCommand {
    pub fn run(&self, json: bool) -> anyhow::Result<()> {
        let results: Vec<(&str, Result<CompetencyId, shared::CompetencyIdError>)> = self
            .ids
            .iter()
            .map(|id| (id.as_str(), CompetencyId::parse(id)))
            .collect();

        if json {
            let rows: Vec<serde_json::Value> = results
                .iter()
                .map(|(id, result)| {
                    serde_json::json!({
                        "id": id,
                        "valid": result.is_ok(),
                        "error": result.as_ref().err().map(|e| e.to_string()),
                    })
                })
                .collect();
            return super::print_json(&rows);
        }

        for (id, result) in &results {
            match result {
                Ok(parsed) => println!(
                    "{} {} (domain: {}, verb: {})",
                    style("✓").green(),
                    id,
                    parsed.domain(),
                    parsed.verb()
                ),
                Err(e) => println!("{} {}", style("✗").red(), e),
            }
        }
        Ok(())
    }
}
