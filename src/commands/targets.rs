//! # Targets Command Implementation
//!
//! Lists the resolved targets of the project in declaration order. By default
//! one line per target (name, type, source directory); `--format` prints the
//! full records instead.

use anyhow::Result;
use clap::Args;
use std::path::Path;

use super::{load_registry, print_value, OutputFormat};

/// List the resolved targets
#[derive(Args, Debug)]
pub struct TargetsArgs {
    /// Only list targets of this type
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub target_type: Option<String>,

    /// Print full target records in this format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Execute the `targets` command.
pub fn execute(root: &Path, args: TargetsArgs) -> Result<()> {
    let registry = load_registry(root)?;
    let targets: Vec<_> = registry
        .targets()
        .iter()
        .filter(|target| {
            args.target_type
                .as_deref()
                .is_none_or(|wanted| target.target_type == wanted)
        })
        .collect();

    if let Some(format) = args.format {
        let mut records = serde_json::Map::new();
        for target in &targets {
            records.insert(target.name.clone(), serde_json::to_value(target)?);
        }
        return print_value(&records, format);
    }

    if targets.is_empty() {
        println!("No targets found.");
        return Ok(());
    }

    for target in &targets {
        println!(
            "{:<20} {:<8} {}",
            target.name,
            target.target_type,
            target.folders.source.display()
        );
    }
    Ok(())
}
