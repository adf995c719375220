//! # Build Targets Library
//!
//! This library resolves the build targets of a JavaScript project: which
//! buildable units exist, where their sources and outputs live, and which
//! files each asset pipeline of a bundler should claim for them. It is used
//! by the `build-targets` command-line tool and can be embedded by any build
//! tool that needs the same model.
//!
//! ## Quick Example
//!
//! ```
//! use build_targets::config::{ConfigLayer, MemoryModuleLoader, ProjectConfig, ProjectConfiguration};
//! use build_targets::path::Locations;
//! use build_targets::rules::TargetsFileRules;
//! use build_targets::targets::TargetRegistry;
//! use serde_json::json;
//! use std::path::Path;
//! use std::rc::Rc;
//!
//! // Project files can come from disk or, as here, from memory
//! let mut files = MemoryModuleLoader::new();
//! files.add_value(
//!     "/repo/build-targets.config.yaml",
//!     json!({ "name": "site", "targets": { "site": { "type": "browser" } } }),
//! );
//!
//! let layer = ProjectConfiguration::layered(Path::new("/repo"), Rc::new(files));
//! let project = ProjectConfig::from_value(layer.get_config(&[]).unwrap()).unwrap();
//! let registry = TargetRegistry::new(project, Locations::new("/repo")).unwrap();
//!
//! let site = registry.get_default_target(None).unwrap();
//! assert_eq!(site.paths.source, Path::new("/repo/src/site"));
//!
//! let rules = TargetsFileRules::new(&registry).get_rules_for_target(site).unwrap();
//! assert!(rules.images.matches("/repo/src/site/logo.png"));
//! assert!(!rules.images.matches("/repo/src/site/favicon.png"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Layered configuration (`config`)**: A configuration value built from
//!   built-in defaults, an optional parent layer and an optional override
//!   file, deep merged in that order and cached per instance.
//! - **Target registry (`targets`)**: Normalizes the raw `targets` entries
//!   of the project configuration against per-type templates and answers
//!   lookups: by name, the default target, the owner of a file.
//! - **File rules (`rules`)**: Per-category descriptions of the files a
//!   target claims (scripts, stylesheets, fonts, images, favicons),
//!   accumulated across a target and the targets it embeds.
//! - **Hooks (`events`)**: Named reducers through which plugins rewrite
//!   targets and rules as they are produced.
//!
//! File access, path resolution and the process environment are reached
//! through small capabilities (`config::ModuleLoader`, `path::Locations`,
//! `environment::Environment`) so everything can run against in-memory
//! fixtures.

pub mod config;
pub mod defaults;
pub mod environment;
pub mod error;
pub mod events;
pub mod path;
pub mod rules;
pub mod suggestions;
pub mod targets;

#[cfg(test)]
mod merge_proptest;
