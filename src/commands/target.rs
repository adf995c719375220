//! # Target Command Implementation
//!
//! Prints one fully resolved target record.

use anyhow::Result;
use clap::Args;
use std::path::Path;

use build_targets::suggestions;

use super::{load_registry, print_value, OutputFormat};

/// Show one resolved target
#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Target name
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "yaml")]
    pub format: OutputFormat,
}

/// Execute the `target` command.
pub fn execute(root: &Path, args: TargetArgs) -> Result<()> {
    let registry = load_registry(root)?;
    let target = registry
        .get_target(&args.name)
        .map_err(|e| suggestions::explain(e, Some(&registry)))?;
    print_value(target, args.format)
}
