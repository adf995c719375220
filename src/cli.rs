//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use build_targets::defaults::ROOT_ENV_VAR;

use crate::commands;

/// Build Targets - Resolve the build targets of a project and their file rules
#[derive(Parser, Debug)]
#[command(name = "build-targets")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Project root directory (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR", env = ROOT_ENV_VAR)]
    root: Option<PathBuf>,

    /// Set log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the resolved targets
    Targets(commands::targets::TargetsArgs),

    /// Show one resolved target
    Target(commands::target::TargetArgs),

    /// Print the name of the default target
    Default(commands::default::DefaultArgs),

    /// Print the target whose source directory contains a file
    Owner(commands::owner::OwnerArgs),

    /// Show the file rules of a target
    Rules(commands::rules::RulesArgs),

    /// Show the merged project configuration
    Config(commands::config::ConfigArgs),

    /// Resolve the dynamic configuration of a browser target
    BrowserConfig(commands::browser_config::BrowserConfigArgs),

    /// List the files of a target with the asset categories that claim them
    Files(commands::files::FilesArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);
        let root = commands::project_root(self.root)?;

        match self.command {
            Commands::Targets(args) => commands::targets::execute(&root, args),
            Commands::Target(args) => commands::target::execute(&root, args),
            Commands::Default(args) => commands::default::execute(&root, args),
            Commands::Owner(args) => commands::owner::execute(&root, args),
            Commands::Rules(args) => commands::rules::execute(&root, args),
            Commands::Config(args) => commands::config::execute(&root, args),
            Commands::BrowserConfig(args) => commands::browser_config::execute(&root, args),
            Commands::Files(args) => commands::files::execute(&root, args),
        }
    }
}

fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // A second initialization (in tests) keeps the first logger.
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
