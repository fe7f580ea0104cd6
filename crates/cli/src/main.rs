//! Curriculum CLI - Inspect and check curriculum artifacts
//!
//! Usage:
//!   curriculum scan --school-root <dir>            - Registry summary and closure status
//!   curriculum resolve <id> --root <dir>           - Unmet requirements of one artifact
//!   curriculum closure --root <dir>                - Closure, dangling references, id audit
//!   curriculum gaps <id> --learner <file> ...      - Requirements a learner does not hold
//!   curriculum validate <file> --target-id <id>    - Check a generated assignment
//!   curriculum competency <id>...                  - Check competency id shape

use clap::{Parser, Subcommand};
use cli::commands::{
    ClosureCommand, CompetencyCommand, GapsCommand, ResolveCommand, ScanCommand, ValidateCommand,
};

#[derive(Parser)]
#[command(name = "curriculum")]
#[command(about = "Curriculum registry, dependency resolution and artifact validation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan curriculum roots and summarize the registry
    Scan(ScanCommand),
    /// Show unmet requirements of a module or campaign
    Resolve(ResolveCommand),
    /// Check structural closure of the whole registry
    Closure(ClosureCommand),
    /// Show requirements a learner does not hold yet
    Gaps(GapsCommand),
    /// Validate a generated artifact
    Validate(ValidateCommand),
    /// Check competency id shape
    Competency(CompetencyCommand),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scan(cmd) => cmd.run(cli.json),
        Commands::Resolve(cmd) => cmd.run(cli.json),
        Commands::Closure(cmd) => cmd.run(cli.json),
        Commands::Gaps(cmd) => cmd.run(cli.json),
        Commands::Validate(cmd) => cmd.run(cli.json),
        Commands::Competency(cmd) => cmd.run(cli.json),
    }
}
