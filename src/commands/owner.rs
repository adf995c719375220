//! # Owner Command Implementation
//!
//! Prints the target whose source directory contains a file. When source
//! directories overlap, the first declared target wins.

use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

use build_targets::suggestions;

use super::load_registry;

/// Print the target whose source directory contains a file
#[derive(Args, Debug)]
pub struct OwnerArgs {
    /// File path, absolute or relative to the project root
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Execute the `owner` command.
pub fn execute(root: &Path, args: OwnerArgs) -> Result<()> {
    let registry = load_registry(root)?;
    let target = registry
        .find_target_for_file(&args.file)
        .map_err(|e| suggestions::explain(e, Some(&registry)))?;
    println!("{}", target.name);
    Ok(())
}
