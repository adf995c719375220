//! Dynamic configuration of browser targets.
//!
//! A browser target can ship a configuration object resolved at build time:
//! a default (inline or from a file) with named configurations layered on
//! top, selected through an environment variable such as
//! `CONFIG=staging,local`.

use super::{ConfigurationSettings, Target, TargetRegistry};
use crate::config::deep_merge;
use crate::defaults::{CONFIGURATION_NAME_PLACEHOLDER, TARGET_NAME_PLACEHOLDER};
use crate::error::{Error, Result};
use log::{debug, warn};
use serde_json::Value;
use std::path::PathBuf;

impl TargetRegistry {
    /// Resolve the dynamic configuration of a browser target.
    ///
    /// Returns `{}` when the feature is disabled for the target.
    pub fn get_browser_target_configuration(&self, target: &Target) -> Result<Value> {
        if target.is.node {
            return Err(Error::UnsupportedOperation {
                operation: "browser target configuration".to_string(),
                message: format!(
                    "'{}' is a node target; only browser targets can generate a configuration",
                    target.name
                ),
            });
        }

        let settings = match &target.configuration {
            Some(settings) if settings.enabled => settings,
            _ => return Ok(Value::Object(Default::default())),
        };

        let mut configuration = self.default_configuration(target, settings)?;

        if settings.load_from_environment {
            let selected = self
                .services
                .environment
                .get_or(&settings.environment_variable, "");
            let directory = configurations_directory(target, settings);

            for name in selected.split(',').map(str::trim).filter(|n| !n.is_empty()) {
                let file = directory.join(format_filename(
                    &settings.filename_format,
                    &target.name,
                    name,
                ));
                let path = self.locations.join(&file);
                if !self.services.loader.exists(&path) {
                    warn!(
                        "Configuration '{}' for target '{}' not found at {}",
                        name,
                        target.name,
                        path.display()
                    );
                    continue;
                }
                debug!("Applying configuration '{}' to '{}'", name, target.name);
                let layer = self.services.loader.load(&path)?;
                let changes = layer.evaluate(&[], &configuration)?;
                configuration = deep_merge(configuration, changes);
            }
        }

        Ok(configuration)
    }

    fn default_configuration(
        &self,
        target: &Target,
        settings: &ConfigurationSettings,
    ) -> Result<Value> {
        if let Some(inline) = settings.default.as_ref().filter(|value| !value.is_null()) {
            return Ok(inline.clone());
        }

        let file = configurations_directory(target, settings)
            .join(format!("{}.config.yaml", target.name));
        let path = self.locations.join(&file);
        let module = self.services.loader.load(&path)?;
        module.evaluate(&[], &Value::Object(Default::default()))
    }
}

/// Directory holding a target's named configurations, project-relative.
fn configurations_directory(target: &Target, settings: &ConfigurationSettings) -> PathBuf {
    if settings.has_folder {
        PathBuf::from(&settings.path).join(&target.name)
    } else {
        PathBuf::from(&settings.path)
    }
}

fn format_filename(format: &str, target_name: &str, configuration_name: &str) -> String {
    format
        .replace(TARGET_NAME_PLACEHOLDER, target_name)
        .replace(CONFIGURATION_NAME_PLACEHOLDER, configuration_name)
}
