//! Default values for build-targets configuration.
//!
//! This module provides centralized default values used across the library
//! and the CLI, ensuring consistency and avoiding duplication.

/// Project configuration override files, probed in this order relative to the
/// project root. The first one that exists wins.
pub const PROJECT_CONFIG_FILENAMES: &[&str] = &[
    "build-targets.config.yaml",
    "build-targets.config.yml",
    "build-targets.config.json",
    "build-targets.config.toml",
    "config/build-targets.config.yaml",
    "config/project.config.yaml",
];

/// Environment variable that sets the project root for the CLI.
pub const ROOT_ENV_VAR: &str = "BUILD_TARGETS_ROOT";

/// Project-relative source directory.
pub const SOURCE_DIR: &str = "src";

/// Project-relative build output directory.
pub const BUILD_DIR: &str = "dist";

/// Project-relative directory holding configuration files.
pub const CONFIG_DIR: &str = "config";

/// Placeholder replaced by the target name in configuration file formats.
pub const TARGET_NAME_PLACEHOLDER: &str = "[target-name]";

/// Placeholder replaced by the configuration name in configuration file formats.
pub const CONFIGURATION_NAME_PLACEHOLDER: &str = "[configuration-name]";
