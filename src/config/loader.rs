//! Module loading capability.
//!
//! The resolution core never reads files directly. Everything that would be
//! "required" from disk (override files, external default configurations)
//! goes through a [`ModuleLoader`], so resolution stays testable without a
//! filesystem.

use crate::error::{Error, Result};
use log::debug;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// A configuration function: receives the caller's arguments followed by the
/// configuration accumulated so far, and returns a partial configuration.
pub type ConfigFn = Rc<dyn Fn(&[Value], &Value) -> Result<Value>>;

/// What a loaded module exports.
#[derive(Clone)]
pub enum Module {
    /// A plain value.
    Value(Value),
    /// A function, invoked later with `(args..., config_so_far)`.
    Function(ConfigFn),
}

impl Module {
    /// Wrap a closure as a function module.
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&[Value], &Value) -> Result<Value> + 'static,
    {
        Module::Function(Rc::new(f))
    }

    /// Evaluate the module: functions are called, values are cloned.
    pub fn evaluate(&self, args: &[Value], current: &Value) -> Result<Value> {
        match self {
            Module::Value(value) => Ok(value.clone()),
            Module::Function(f) => f(args, current),
        }
    }
}

impl fmt::Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Module::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Module::Function(_) => f.write_str("Function(..)"),
        }
    }
}

/// Loads the value a file "exports".
pub trait ModuleLoader {
    /// Whether a module exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Load the module at `path`, failing if it cannot be found or evaluated.
    fn load(&self, path: &Path) -> Result<Module>;
}

/// Loads JSON, YAML and TOML files from disk.
#[derive(Debug, Clone, Default)]
pub struct FsModuleLoader;

impl FsModuleLoader {
    pub fn new() -> Self {
        Self
    }
}

impl ModuleLoader for FsModuleLoader {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn load(&self, path: &Path) -> Result<Module> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let value = match extension.as_str() {
            "json" => serde_json::from_str(&std::fs::read_to_string(path)?)?,
            "yaml" | "yml" => serde_yaml::from_str(&std::fs::read_to_string(path)?)?,
            "toml" => {
                let table: toml::Value = toml::from_str(&std::fs::read_to_string(path)?)?;
                serde_json::to_value(table)?
            }
            "js" | "mjs" | "cjs" => {
                return Err(Error::NotImplemented {
                    feature: format!("evaluating JavaScript modules ({})", path.display()),
                })
            }
            other => {
                return Err(Error::ConfigParse {
                    message: format!(
                        "Unsupported configuration format '{}' for {}",
                        other,
                        path.display()
                    ),
                    hint: Some("Use a .json, .yaml, .yml or .toml file".to_string()),
                })
            }
        };

        debug!("Loaded module {}", path.display());
        Ok(Module::Value(value))
    }
}

/// In-memory module table, keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryModuleLoader {
    modules: HashMap<PathBuf, Module>,
}

impl MemoryModuleLoader {
    /// Create an empty loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a value module
    pub fn add_value<P: AsRef<Path>>(&mut self, path: P, value: Value) -> &mut Self {
        self.add_module(path, Module::Value(value))
    }

    /// Register a function module
    pub fn add_function<P, F>(&mut self, path: P, f: F) -> &mut Self
    where
        P: AsRef<Path>,
        F: Fn(&[Value], &Value) -> Result<Value> + 'static,
    {
        self.add_module(path, Module::function(f))
    }

    /// Register any module
    pub fn add_module<P: AsRef<Path>>(&mut self, path: P, module: Module) -> &mut Self {
        self.modules.insert(path.as_ref().to_path_buf(), module);
        self
    }

    /// Number of registered modules
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Check if no modules are registered
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl ModuleLoader for MemoryModuleLoader {
    fn exists(&self, path: &Path) -> bool {
        self.modules.contains_key(path)
    }

    fn load(&self, path: &Path) -> Result<Module> {
        self.modules
            .get(path)
            .cloned()
            .ok_or_else(|| Error::OverrideLoad {
                path: path.to_path_buf(),
                message: "module not found".to_string(),
            })
    }
}
