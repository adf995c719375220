//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `build-targets` command-line tool. Each subcommand is defined in its own
//! file.
//!
//! ## Structure
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the project root and the parsed `Args`,
//!   resolves what it needs through the `build_targets` library and prints
//!   the result to stdout.
//!
//! Commands never print library errors directly: they pass through
//! `build_targets::suggestions::explain` to pick up hints.

pub mod browser_config;
pub mod config;
pub mod default;
pub mod files;
pub mod owner;
pub mod rules;
pub mod target;
pub mod targets;

use anyhow::{Context, Result};
use clap::ValueEnum;
use log::debug;
use serde::Serialize;
use std::path::{Path, PathBuf};

use build_targets::error::Error;
use build_targets::suggestions;
use build_targets::targets::TargetRegistry;

/// Serialization format for structured output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// YAML document
    #[default]
    Yaml,
    /// Pretty-printed JSON
    Json,
}

/// Resolve the project root: the given directory or the current one, made
/// absolute.
pub fn project_root(root: Option<PathBuf>) -> Result<PathBuf> {
    let root = match root {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };
    root.canonicalize()
        .with_context(|| format!("Project root not found: {}", root.display()))
}

/// Load the project configuration at `root` and resolve its targets.
pub fn load_registry(root: &Path) -> Result<TargetRegistry> {
    debug!("Loading project from {}", root.display());
    TargetRegistry::load(root).map_err(|error| match error {
        Error::InvalidTargetType {
            target,
            target_type,
        } => {
            let known = known_target_types(root);
            let known: Vec<&str> = known.iter().map(String::as_str).collect();
            suggestions::invalid_target_type(&target, &target_type, &known)
        }
        other => suggestions::explain(other, None),
    })
}

/// Template names of the project, for error hints.
fn known_target_types(root: &Path) -> Vec<String> {
    use build_targets::config::{
        ConfigLayer, FsModuleLoader, ProjectConfig, ProjectConfiguration,
    };
    use std::rc::Rc;

    let layer = ProjectConfiguration::layered(root, Rc::new(FsModuleLoader::new()));
    layer
        .get_config(&[])
        .and_then(ProjectConfig::from_value)
        .map(|project| project.targets_templates.keys().cloned().collect())
        .unwrap_or_default()
}

/// Print a serializable value in the requested format.
pub fn print_value<T: Serialize>(value: &T, format: OutputFormat) -> Result<()> {
    let rendered = match format {
        OutputFormat::Yaml => serde_yaml::to_string(value).context("Failed to render YAML")?,
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(value).context("Failed to render JSON")?;
            json.push('\n');
            json
        }
    };
    print!("{}", rendered);
    Ok(())
}
