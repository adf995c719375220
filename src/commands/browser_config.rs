//! # Browser Config Command Implementation
//!
//! Prints the dynamic configuration of a browser target: its default
//! configuration with the configurations named in its environment variable
//! (`CONFIG` unless the target says otherwise) layered on top.

use anyhow::Result;
use clap::Args;
use std::path::Path;

use build_targets::suggestions;

use super::{load_registry, print_value, OutputFormat};

/// Resolve the dynamic configuration of a browser target
#[derive(Args, Debug)]
pub struct BrowserConfigArgs {
    /// Target name
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,
}

/// Execute the `browser-config` command.
pub fn execute(root: &Path, args: BrowserConfigArgs) -> Result<()> {
    let registry = load_registry(root)?;
    let target = registry
        .get_target(&args.name)
        .map_err(|e| suggestions::explain(e, Some(&registry)))?;
    let configuration = registry
        .get_browser_target_configuration(target)
        .map_err(|e| suggestions::explain(e, Some(&registry)))?;
    print_value(&configuration, args.format)
}
