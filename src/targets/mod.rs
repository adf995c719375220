//! # Target Registry
//!
//! Normalizes the raw `targets` entries of the project configuration into
//! complete [`Target`] records and answers lookups over them.
//!
//! ## Normalization
//!
//! For each raw entry, in declaration order:
//!
//! 1. Resolve the entry's `type` (default `node`) and its template. A type
//!    without a template fails the whole pass with `InvalidTargetType`.
//! 2. Merge the entry over the template (entry wins) and set `name` to the
//!    entry key.
//! 3. Derive `is` from the type.
//! 4. Derive `folders` (project-relative) and `paths` (absolute).
//! 5. Reduce the record through the `target-load` hook; the hook output
//!    replaces the record.
//!
//! Once every target is loaded, `includeTargets` references are checked.

mod browser;

use crate::config::{
    deep_merge, ConfigLayer, FsModuleLoader, ModuleLoader, ProjectConfig, ProjectConfiguration,
};
use crate::environment::{Environment, ProcessEnvironment};
use crate::error::{Error, Result};
use crate::events::{Events, TARGET_LOAD};
use crate::path::{normalize, Locations};
use log::debug;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Type used when a target entry does not declare one.
pub const DEFAULT_TARGET_TYPE: &str = "node";

/// Mutually exclusive type flags, derived from the target type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetKind {
    pub node: bool,
    pub browser: bool,
}

impl TargetKind {
    pub fn from_type(target_type: &str) -> Self {
        Self {
            node: target_type == "node",
            browser: target_type == "browser",
        }
    }
}

/// A source/build pair of paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetPaths {
    pub source: PathBuf,
    pub build: PathBuf,
}

/// Dynamic configuration settings of a browser target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigurationSettings {
    /// Whether the target has a dynamic configuration at all.
    pub enabled: bool,
    /// Inline default configuration; when `null` it is loaded from a file.
    pub default: Option<Value>,
    /// Project-relative directory holding the configuration files.
    pub path: String,
    /// Whether the configuration files live in a directory named after the target.
    pub has_folder: bool,
    /// Variable listing the configurations to layer on top of the default.
    pub environment_variable: String,
    pub load_from_environment: bool,
    /// File name of a named configuration, with `[target-name]` and
    /// `[configuration-name]` placeholders.
    pub filename_format: String,
}

impl Default for ConfigurationSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            default: None,
            path: "config/".to_string(),
            has_folder: true,
            environment_variable: "CONFIG".to_string(),
            load_from_environment: true,
            filename_format: "[target-name].[configuration-name].config.yaml".to_string(),
        }
    }
}

/// A fully resolved buildable unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    pub name: String,
    #[serde(rename = "type")]
    pub target_type: String,
    #[serde(default)]
    pub is: TargetKind,
    /// Absolute source and build directories.
    #[serde(default)]
    pub paths: TargetPaths,
    /// Source and build directories relative to the project root.
    #[serde(default)]
    pub folders: TargetPaths,
    #[serde(default)]
    pub bundle: bool,
    #[serde(default)]
    pub transpile: bool,
    #[serde(default)]
    pub engine: Option<String>,
    #[serde(default)]
    pub has_folder: bool,
    #[serde(default)]
    pub create_folder: bool,
    #[serde(default)]
    pub folder: Option<String>,
    /// Other targets whose sources this one embeds.
    #[serde(default)]
    pub include_targets: Vec<String>,
    /// npm packages whose sources this one processes.
    #[serde(default)]
    pub include_modules: Vec<String>,
    /// Browser targets only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<ConfigurationSettings>,
    /// Template and user settings this crate does not interpret
    /// (`entry`, `html`, `devServer`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Target {
    /// The explicit folder name, if one is set and non-empty.
    pub fn folder_name(&self) -> Option<&str> {
        self.folder.as_deref().filter(|folder| !folder.is_empty())
    }

    /// Whether `path` lives inside this target's source directory.
    pub fn contains(&self, path: &Path) -> bool {
        path.starts_with(&self.paths.source)
    }
}

/// Resolved targets in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Targets {
    items: Vec<Target>,
}

impl Targets {
    pub fn get(&self, name: &str) -> Option<&Target> {
        self.items.iter().find(|target| target.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.items.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|target| target.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn insert(&mut self, target: Target) {
        match self.items.iter_mut().find(|existing| existing.name == target.name) {
            Some(existing) => *existing = target,
            None => self.items.push(target),
        }
    }
}

impl<'a> IntoIterator for &'a Targets {
    type Item = &'a Target;
    type IntoIter = std::slice::Iter<'a, Target>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Serialize for Targets {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.items.len()))?;
        for target in &self.items {
            map.serialize_entry(&target.name, target)?;
        }
        map.end()
    }
}

/// Capabilities the registry consumes.
#[derive(Clone)]
pub struct Services {
    pub events: Rc<Events>,
    pub loader: Rc<dyn ModuleLoader>,
    pub environment: Rc<dyn Environment>,
}

impl Default for Services {
    fn default() -> Self {
        Self {
            events: Rc::new(Events::new()),
            loader: Rc::new(FsModuleLoader::new()),
            environment: Rc::new(ProcessEnvironment),
        }
    }
}

/// Owns the project configuration and its resolved targets.
pub struct TargetRegistry {
    project: ProjectConfig,
    locations: Locations,
    services: Services,
    targets: Targets,
}

impl TargetRegistry {
    /// Build a registry with default services: no hooks, files from disk and
    /// the process environment.
    pub fn new(project: ProjectConfig, locations: Locations) -> Result<Self> {
        Self::with_services(project, locations, Services::default())
    }

    /// Build a registry, resolving every target immediately so an invalid
    /// target type fails here rather than on first lookup.
    pub fn with_services(
        project: ProjectConfig,
        mut locations: Locations,
        services: Services,
    ) -> Result<Self> {
        locations
            .add_location("source", &project.paths.source)
            .add_location("build", &project.paths.build)
            .add_location("config", &project.paths.config);

        let mut registry = Self {
            project,
            locations,
            services,
            targets: Targets::default(),
        };
        registry.targets = registry.resolve()?;
        Ok(registry)
    }

    /// Load the project rooted at `root` from disk and resolve its targets.
    pub fn load(root: &Path) -> Result<Self> {
        let loader: Rc<dyn ModuleLoader> = Rc::new(FsModuleLoader::new());
        let layer = ProjectConfiguration::layered(root, loader.clone());
        let project = ProjectConfig::from_value(layer.get_config(&[])?)?;
        let services = Services {
            loader,
            ..Services::default()
        };
        Self::with_services(project, Locations::new(root), services)
    }

    pub fn project(&self) -> &ProjectConfig {
        &self.project
    }

    pub fn locations(&self) -> &Locations {
        &self.locations
    }

    pub fn events(&self) -> &Rc<Events> {
        &self.services.events
    }

    /// Rebuild every target from the project configuration.
    pub fn get_targets(&mut self) -> Result<&Targets> {
        self.targets = self.resolve()?;
        Ok(&self.targets)
    }

    /// The targets of the last resolution pass.
    pub fn targets(&self) -> &Targets {
        &self.targets
    }

    /// Look up a target by name.
    pub fn get_target(&self, name: &str) -> Result<&Target> {
        self.targets.get(name).ok_or_else(|| Error::TargetNotFound {
            name: name.to_string(),
        })
    }

    /// The target named after the project, otherwise the first declared one,
    /// optionally restricted to `target_type`.
    pub fn get_default_target(&self, target_type: Option<&str>) -> Result<&Target> {
        let candidates: Vec<&Target> = self
            .targets
            .iter()
            .filter(|target| target_type.is_none_or(|wanted| target.target_type == wanted))
            .collect();

        let by_project_name = self.project.name.as_deref().and_then(|project_name| {
            candidates
                .iter()
                .find(|target| target.name == project_name)
                .copied()
        });

        by_project_name
            .or_else(|| candidates.first().copied())
            .ok_or_else(|| Error::NoTargets {
                target_type: target_type.map(str::to_string),
            })
    }

    /// The first target, in declaration order, whose source directory
    /// contains `path`. Relative paths are taken from the project root.
    pub fn find_target_for_file<P: AsRef<Path>>(&self, path: P) -> Result<&Target> {
        let absolute = self.locations.join(path.as_ref());
        self.targets
            .iter()
            .find(|target| target.contains(&absolute))
            .ok_or(Error::FileOwnerNotFound { path: absolute })
    }

    fn resolve(&self) -> Result<Targets> {
        let mut targets = Targets::default();
        for (name, raw) in &self.project.targets {
            let target = self.normalize(name, raw)?;
            debug!(
                "Loaded target '{}' ({}) from {}",
                target.name,
                target.target_type,
                target.paths.source.display()
            );
            targets.insert(target);
        }
        validate_includes(&targets)?;
        Ok(targets)
    }

    fn normalize(&self, name: &str, raw: &Value) -> Result<Target> {
        let target_type = match raw.get("type") {
            None => DEFAULT_TARGET_TYPE.to_string(),
            Some(Value::String(target_type)) => target_type.clone(),
            Some(other) => {
                return Err(Error::InvalidTargetType {
                    target: name.to_string(),
                    target_type: other.to_string(),
                })
            }
        };

        let template = self
            .project
            .template(&target_type)
            .ok_or_else(|| Error::InvalidTargetType {
                target: name.to_string(),
                target_type: target_type.clone(),
            })?;

        let mut merged = deep_merge(template.clone(), raw.clone());
        if let Value::Object(map) = &mut merged {
            map.insert("name".to_string(), Value::String(name.to_string()));
            map.insert("type".to_string(), Value::String(target_type.clone()));
        }

        let mut target: Target = serde_json::from_value(merged).map_err(|e| Error::ConfigParse {
            message: format!("Invalid settings for target '{}': {}", name, e),
            hint: None,
        })?;

        target.is = TargetKind::from_type(&target_type);
        if !target.is.browser {
            target.configuration = None;
        } else if target.configuration.is_none() {
            target.configuration = Some(ConfigurationSettings::default());
        }

        let folder = target.folder_name().unwrap_or(name).to_string();
        let in_own_folder = target.has_folder || target.folder_name().is_some();
        let paths = &self.project.paths;

        target.folders = TargetPaths {
            source: if in_own_folder {
                normalize(&Path::new(&paths.source).join(&folder))
            } else {
                normalize(Path::new(&paths.source))
            },
            build: if in_own_folder || target.create_folder {
                normalize(&Path::new(&paths.build).join(&folder))
            } else {
                normalize(Path::new(&paths.build))
            },
        };
        target.paths = TargetPaths {
            source: self.locations.join(&target.folders.source),
            build: self.locations.join(&target.folders.build),
        };

        Ok(self
            .services
            .events
            .targets
            .reduce(&[TARGET_LOAD], target, &()))
    }
}

fn validate_includes(targets: &Targets) -> Result<()> {
    for target in targets {
        for included in &target.include_targets {
            if included == &target.name {
                return Err(Error::ConfigParse {
                    message: format!("Target '{}' includes itself", target.name),
                    hint: Some("Remove it from its own includeTargets".to_string()),
                });
            }
            if !targets.contains(included) {
                return Err(Error::TargetNotFound {
                    name: included.clone(),
                });
            }
        }
    }
    Ok(())
}
