//! # Files Command Implementation
//!
//! Walks a target's source directory and prints every file together with the
//! asset categories whose rule claims it. Useful to check that fonts, images
//! and favicons end up in exactly one pipeline.

use anyhow::{Context, Result};
use clap::Args;
use std::path::Path;
use walkdir::WalkDir;

use build_targets::path::to_slash;
use build_targets::rules::TargetsFileRules;
use build_targets::suggestions;

use super::load_registry;

/// List the files of a target with the asset categories that claim them
#[derive(Args, Debug)]
pub struct FilesArgs {
    /// Target name (defaults to the default target)
    #[arg(value_name = "NAME")]
    pub name: Option<String>,

    /// Hide files no category claims
    #[arg(long)]
    pub claimed: bool,
}

/// Execute the `files` command.
pub fn execute(root: &Path, args: FilesArgs) -> Result<()> {
    let registry = load_registry(root)?;
    let target = match &args.name {
        Some(name) => registry.get_target(name),
        None => registry.get_default_target(None),
    }
    .map_err(|e| suggestions::explain(e, Some(&registry)))?;

    let rules = TargetsFileRules::new(&registry)
        .get_rules_for_target(target)
        .map_err(|e| suggestions::explain(e, Some(&registry)))?;

    let source = &target.paths.source;
    if !source.is_dir() {
        println!("No source directory at {}", source.display());
        return Ok(());
    }

    for entry in WalkDir::new(source).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to read {}", source.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let categories = rules.categories_for(&to_slash(entry.path()));
        if args.claimed && categories.is_empty() {
            continue;
        }
        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let names = if categories.is_empty() {
            "-".to_string()
        } else {
            categories
                .iter()
                .map(|category| category.name())
                .collect::<Vec<_>>()
                .join(",")
        };
        println!("{}\t{}", to_slash(relative), names);
    }
    Ok(())
}
