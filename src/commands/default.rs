//! # Default Command Implementation
//!
//! Prints the name of the default target: the target named after the
//! project, otherwise the first declared one.

use anyhow::Result;
use clap::Args;
use std::path::Path;

use build_targets::suggestions;

use super::load_registry;

/// Print the name of the default target
#[derive(Args, Debug)]
pub struct DefaultArgs {
    /// Only consider targets of this type
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub target_type: Option<String>,
}

/// Execute the `default` command.
pub fn execute(root: &Path, args: DefaultArgs) -> Result<()> {
    let registry = load_registry(root)?;
    let target = registry
        .get_default_target(args.target_type.as_deref())
        .map_err(|e| suggestions::explain(e, Some(&registry)))?;
    println!("{}", target.name);
    Ok(())
}
