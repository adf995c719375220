//! # Layered Configuration
//!
//! A configuration object is built by cascading three layers:
//!
//! 1. the configuration of an optional **parent** layer,
//! 2. the output of the layer's own [`ConfigCreator`], merged on top of the
//!    parent (own wins),
//! 3. an optional **override file**, discovered on first use from an ordered
//!    list of candidate paths, merged last (override wins).
//!
//! A non-factory layer computes once and returns the cached result on every
//! later call. A factory layer recomputes layers 1-3 on every call; the
//! override file is still probed and loaded only once.
//!
//! The base type cannot be instantiated without a creator: [`LayeredConfig`]
//! is generic over [`ConfigCreator`], whose `create_config` is required.

pub mod loader;
pub mod merge;
pub mod project;

pub use loader::{ConfigFn, FsModuleLoader, MemoryModuleLoader, Module, ModuleLoader};
pub use merge::{deep_merge, deep_merge_all};
pub use project::{ProjectConfig, ProjectConfiguration, ProjectPaths};

use crate::error::Result;
use log::debug;
use serde_json::Value;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Produces one layer's own partial configuration.
pub trait ConfigCreator {
    /// `args` are the caller's arguments; `parent` is the configuration
    /// accumulated from the parent layer (read-only context).
    fn create_config(&self, args: &[Value], parent: &Value) -> Result<Value>;
}

impl<F> ConfigCreator for F
where
    F: Fn(&[Value], &Value) -> Result<Value>,
{
    fn create_config(&self, args: &[Value], parent: &Value) -> Result<Value> {
        self(args, parent)
    }
}

/// Anything that can resolve a final configuration for a set of arguments.
pub trait ConfigLayer {
    fn get_config(&self, args: &[Value]) -> Result<Value>;
}

/// One layered-configuration instance.
pub struct LayeredConfig<C> {
    creator: C,
    parent: Option<Rc<dyn ConfigLayer>>,
    override_paths: Vec<PathBuf>,
    as_factory: bool,
    loader: Rc<dyn ModuleLoader>,
    override_provider: RefCell<Option<Module>>,
    override_source: RefCell<Option<PathBuf>>,
    result: RefCell<Option<Value>>,
}

impl<C: ConfigCreator> LayeredConfig<C> {
    /// Create a caching layer with no parent and no override candidates.
    pub fn new(creator: C, loader: Rc<dyn ModuleLoader>) -> Self {
        Self {
            creator,
            parent: None,
            override_paths: Vec::new(),
            as_factory: false,
            loader,
            override_provider: RefCell::new(None),
            override_source: RefCell::new(None),
            result: RefCell::new(None),
        }
    }

    /// Set the parent layer whose configuration this one builds upon.
    pub fn with_parent(mut self, parent: Rc<dyn ConfigLayer>) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Set the ordered list of override file candidates.
    pub fn with_override_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.override_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Recompute on every call instead of caching the first result.
    pub fn as_factory(mut self, as_factory: bool) -> Self {
        self.as_factory = as_factory;
        self
    }

    /// Whether this layer recomputes on every call.
    pub fn is_factory(&self) -> bool {
        self.as_factory
    }

    /// The override file that was loaded, if the probe found one.
    pub fn override_source(&self) -> Option<PathBuf> {
        self.override_source.borrow().clone()
    }

    /// Probe the override candidates on first use and return the provider.
    fn override_provider(&self) -> Result<Module> {
        if let Some(provider) = self.override_provider.borrow().as_ref() {
            return Ok(provider.clone());
        }

        let found = self
            .override_paths
            .iter()
            .find(|path| self.loader.exists(path));

        let provider = match found {
            Some(path) => {
                debug!("Using override file {}", path.display());
                let module = self.loader.load(path)?;
                *self.override_source.borrow_mut() = Some(path.clone());
                module
            }
            None => Module::Value(Value::Object(Default::default())),
        };

        *self.override_provider.borrow_mut() = Some(provider.clone());
        Ok(provider)
    }

    fn resolve(&self, args: &[Value]) -> Result<Value> {
        let provider = self.override_provider()?;

        let parent = match &self.parent {
            Some(parent) => parent.get_config(args)?,
            None => Value::Object(Default::default()),
        };
        let own = self.creator.create_config(args, &parent)?;
        let layered = deep_merge(parent, own);

        let overrides = provider.evaluate(args, &layered)?;
        Ok(deep_merge(layered, overrides))
    }
}

impl<C: ConfigCreator> ConfigLayer for LayeredConfig<C> {
    fn get_config(&self, args: &[Value]) -> Result<Value> {
        if !self.as_factory {
            if let Some(cached) = self.result.borrow().as_ref() {
                return Ok(cached.clone());
            }
        }

        let config = self.resolve(args)?;
        if !self.as_factory {
            *self.result.borrow_mut() = Some(config.clone());
        }
        Ok(config)
    }
}

/// Build the candidate override paths for `file_names` under `root`.
pub fn override_candidates<S: AsRef<str>>(root: &Path, file_names: &[S]) -> Vec<PathBuf> {
    file_names
        .iter()
        .map(|name| root.join(name.as_ref()))
        .collect()
}
