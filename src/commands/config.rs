//! # Config Command Implementation
//!
//! Prints the merged project configuration: built-in defaults with the
//! project's configuration file on top, before any target is normalized.

use anyhow::Result;
use clap::Args;
use log::info;
use std::path::Path;
use std::rc::Rc;

use build_targets::config::{ConfigLayer, FsModuleLoader, ProjectConfiguration};

use super::{print_value, OutputFormat};

/// Show the merged project configuration
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "yaml")]
    pub format: OutputFormat,
}

/// Execute the `config` command.
pub fn execute(root: &Path, args: ConfigArgs) -> Result<()> {
    let layer = ProjectConfiguration::layered(root, Rc::new(FsModuleLoader::new()));
    let config = layer.get_config(&[])?;
    match layer.override_source() {
        Some(path) => info!("Configuration file: {}", path.display()),
        None => info!("No configuration file found, using defaults"),
    }
    print_value(&config, args.format)
}
