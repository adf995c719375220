//! Project configuration: built-in defaults, target templates and the typed
//! view the target registry consumes.

use super::{override_candidates, ConfigCreator, LayeredConfig, ModuleLoader};
use crate::defaults::{BUILD_DIR, CONFIG_DIR, PROJECT_CONFIG_FILENAMES, SOURCE_DIR};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::path::Path;
use std::rc::Rc;

/// Project-relative locations of the source, build and config directories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectPaths {
    #[serde(default = "default_source_dir")]
    pub source: String,
    #[serde(default = "default_build_dir")]
    pub build: String,
    #[serde(default = "default_config_dir")]
    pub config: String,
}

fn default_source_dir() -> String {
    SOURCE_DIR.to_string()
}

fn default_build_dir() -> String {
    BUILD_DIR.to_string()
}

fn default_config_dir() -> String {
    CONFIG_DIR.to_string()
}

impl Default for ProjectPaths {
    fn default() -> Self {
        Self {
            source: default_source_dir(),
            build: default_build_dir(),
            config: default_config_dir(),
        }
    }
}

/// The resolved project configuration.
///
/// `targets` and `targetsTemplates` stay untyped here: target entries are
/// sparse user input, normalized by the registry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Project name; a target with the same name is the default target.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub paths: ProjectPaths,
    /// Raw target entries, in declaration order.
    #[serde(default)]
    pub targets: Map<String, Value>,
    /// Template per target type.
    #[serde(default)]
    pub targets_templates: Map<String, Value>,
    /// Settings this crate does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProjectConfig {
    /// Deserialize a merged configuration value.
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::ConfigParse {
                message: "The project configuration must be a mapping".to_string(),
                hint: None,
            });
        }
        let config: ProjectConfig = serde_json::from_value(value)?;
        for (name, entry) in &config.targets {
            if !entry.is_object() {
                return Err(Error::ConfigParse {
                    message: format!("Target '{}' must be a mapping", name),
                    hint: Some(
                        "Declare targets as `targets: { <name>: { type: ... } }`".to_string(),
                    ),
                });
            }
        }
        Ok(config)
    }

    /// Look up the template for a target type.
    pub fn template(&self, target_type: &str) -> Option<&Value> {
        self.targets_templates.get(target_type)
    }
}

/// Default template for `node` targets.
pub fn node_template() -> Value {
    json!({
        "type": "node",
        "bundle": false,
        "transpile": false,
        "engine": "webpack",
        "hasFolder": true,
        "createFolder": false,
        "folder": "",
        "entry": { "default": "index.js" },
        "output": { "default": "[target-name].js" },
        "includeTargets": [],
        "includeModules": [],
        "runOnDevelopment": false,
        "watch": { "development": false, "production": false }
    })
}

/// Default template for `browser` targets.
pub fn browser_template() -> Value {
    json!({
        "type": "browser",
        "bundle": false,
        "transpile": true,
        "engine": "webpack",
        "hasFolder": true,
        "createFolder": true,
        "folder": "",
        "entry": { "default": "index.js" },
        "html": { "default": "index.html", "template": null, "filename": null },
        "includeTargets": [],
        "includeModules": [],
        "runOnDevelopment": false,
        "devServer": { "port": 2509, "reload": true, "host": "localhost" },
        "configuration": {
            "enabled": false,
            "default": null,
            "path": "config/",
            "hasFolder": true,
            "environmentVariable": "CONFIG",
            "loadFromEnvironment": true,
            "filenameFormat": "[target-name].[configuration-name].config.yaml"
        }
    })
}

/// Creator for the project configuration layer: returns the built-in
/// defaults, which override files then refine.
#[derive(Debug, Clone, Default)]
pub struct ProjectConfiguration;

impl ProjectConfiguration {
    /// The project configuration layer for `root`, probing the default
    /// override file names.
    pub fn layered(root: &Path, loader: Rc<dyn ModuleLoader>) -> LayeredConfig<Self> {
        LayeredConfig::new(Self, loader)
            .with_override_paths(override_candidates(root, PROJECT_CONFIG_FILENAMES))
    }
}

impl ConfigCreator for ProjectConfiguration {
    fn create_config(&self, _args: &[Value], _parent: &Value) -> Result<Value> {
        Ok(json!({
            "paths": serde_json::to_value(ProjectPaths::default())?,
            "targets": {},
            "targetsTemplates": {
                "node": node_template(),
                "browser": browser_template()
            }
        }))
    }
}
