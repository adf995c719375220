//! # Error Handling
//!
//! This module defines the centralized error type for `build-targets`. It uses
//! the `thiserror` library to describe every failure the resolution core can
//! surface, with enough context (target names, file paths, hook names) for the
//! caller to act on.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Each variant corresponds to one kind of
//!   failure:
//!   - a required capability that is not available (`NotImplemented`),
//!   - an override file that exists but could not be loaded (`OverrideLoad`),
//!   - a target declaring a type with no template (`InvalidTargetType`),
//!   - lookups by unknown name (`TargetNotFound`, `NoTargets`),
//!   - reverse lookups with no owner (`FileOwnerNotFound`),
//!   - operations that do not apply to a target (`UnsupportedOperation`),
//!   - malformed configuration (`ConfigParse`).
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! None of these errors are retried inside the library. Recovery, such as
//! printing a help message for an unknown target, belongs to the caller.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for build-targets operations
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration is malformed.
    ///
    /// Includes the specific issue and optionally a hint about how to fix it.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// A capability was asked for something it cannot do, such as evaluating
    /// a JavaScript module.
    #[error("Feature not implemented: {feature}")]
    NotImplemented { feature: String },

    /// An override or configuration file was found but failed to load.
    ///
    /// The loader's own message is carried verbatim.
    #[error("Failed to load {}: {message}", path.display())]
    OverrideLoad { path: PathBuf, message: String },

    /// A target declared a type for which no template is registered.
    #[error("Invalid type for target '{target}': '{target_type}'")]
    InvalidTargetType { target: String, target_type: String },

    /// A lookup by target name failed.
    #[error("The required target doesn't exist: {name}")]
    TargetNotFound { name: String },

    /// Default-target selection had nothing to choose from.
    #[error("No targets{} found", target_type.as_ref().map(|t| format!(" of type '{}'", t)).unwrap_or_default())]
    NoTargets { target_type: Option<String> },

    /// No target's source directory contains the given file.
    #[error("A target for the following file couldn't be found: {}", path.display())]
    FileOwnerNotFound { path: PathBuf },

    /// The operation does not apply to the given target.
    #[error("Unsupported operation: {operation} - {message}")]
    UnsupportedOperation { operation: String, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON parsing or conversion error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A TOML parsing error, wrapped from `toml::de::Error`.
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// A glob pattern error, wrapped from `globset::Error`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] globset::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_config_parse() {
        let error = Error::ConfigParse {
            message: "targets must be a mapping".to_string(),
            hint: None,
        };
        let display = format!("{}", error);
        assert!(display.contains("Configuration parsing error"));
        assert!(display.contains("targets must be a mapping"));
        assert!(!display.contains("hint:"));
    }

    #[test]
    fn test_error_display_config_parse_with_hint() {
        let error = Error::ConfigParse {
            message: "Unknown location 'assets'".to_string(),
            hint: Some("Register the location before joining from it".to_string()),
        };
        let display = format!("{}", error);
        assert!(display.contains("Unknown location 'assets'"));
        assert!(display.contains("hint:"));
        assert!(display.contains("Register the location"));
    }

    #[test]
    fn test_error_display_invalid_target_type() {
        let error = Error::InvalidTargetType {
            target: "backend".to_string(),
            target_type: "deno".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Invalid type"));
        assert!(display.contains("backend"));
        assert!(display.contains("deno"));
    }

    #[test]
    fn test_error_display_target_not_found() {
        let error = Error::TargetNotFound {
            name: "frontend".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "The required target doesn't exist: frontend"
        );
    }

    #[test]
    fn test_error_display_no_targets() {
        let any = Error::NoTargets { target_type: None };
        assert_eq!(any.to_string(), "No targets found");

        let typed = Error::NoTargets {
            target_type: Some("browser".to_string()),
        };
        assert_eq!(typed.to_string(), "No targets of type 'browser' found");
    }

    #[test]
    fn test_error_display_file_owner_not_found() {
        let error = Error::FileOwnerNotFound {
            path: PathBuf::from("/project/unrelated/path.js"),
        };
        let display = format!("{}", error);
        assert!(display.contains("couldn't be found"));
        assert!(display.contains("/project/unrelated/path.js"));
    }

    #[test]
    fn test_error_display_override_load() {
        let error = Error::OverrideLoad {
            path: PathBuf::from("build-targets.config.yaml"),
            message: "mapping values are not allowed here".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("build-targets.config.yaml"));
        assert!(display.contains("mapping values are not allowed here"));
    }

    #[test]
    fn test_error_display_unsupported_operation() {
        let error = Error::UnsupportedOperation {
            operation: "browser configuration".to_string(),
            message: "'api' is a node target".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Unsupported operation"));
        assert!(display.contains("'api' is a node target"));
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let error: Error = io_error.into();
        let display = format!("{}", error);
        assert!(display.contains("I/O error"));
        assert!(display.contains("File not found"));
    }

    #[test]
    fn test_error_from_regex_error() {
        let regex_error = regex::Error::Syntax("Invalid regex".to_string());
        let error: Error = regex_error.into();
        assert!(format!("{}", error).contains("Regex error"));
    }

    #[test]
    fn test_error_from_glob_error() {
        let glob_error = globset::Glob::new("assets/{png").unwrap_err();
        let error: Error = glob_error.into();
        assert!(format!("{}", error).contains("Glob pattern error"));
    }

    #[test]
    fn test_error_from_yaml_error() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("invalid: [unclosed").unwrap_err();
        let error: Error = yaml_error.into();
        assert!(format!("{}", error).contains("YAML parsing error"));
    }
}
