//! CLI Commands

pub mod competency;
pub mod resolve;
pub mod scan;
pub mod validate;

pub use competency::CompetencyCommand;
pub use resolve::{ClosureCommand, GapsCommand, ResolveCommand};
pub use scan::{RootArgs, ScanCommand};
pub use validate::ValidateCommand;

/// Print a value as pretty JSON on stdout
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
