//! # Rules Command Implementation
//!
//! Prints the file rule bundle of a target: one rule per asset category,
//! covering the target and every target it lists in `includeTargets`.

use anyhow::Result;
use clap::Args;
use std::path::Path;

use build_targets::rules::TargetsFileRules;
use build_targets::suggestions;

use super::{load_registry, print_value, OutputFormat};

/// Show the file rules of a target
#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Target name (defaults to the default target)
    #[arg(value_name = "NAME")]
    pub name: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "yaml")]
    pub format: OutputFormat,
}

/// Execute the `rules` command.
pub fn execute(root: &Path, args: RulesArgs) -> Result<()> {
    let registry = load_registry(root)?;
    let target = match &args.name {
        Some(name) => registry.get_target(name),
        None => registry.get_default_target(None),
    }
    .map_err(|e| suggestions::explain(e, Some(&registry)))?;

    let rules = TargetsFileRules::new(&registry)
        .get_rules_for_target(target)
        .map_err(|e| suggestions::explain(e, Some(&registry)))?;
    print_value(&rules, args.format)
}
