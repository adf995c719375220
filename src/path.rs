//! Path utilities: project locations and glob matching.

use crate::error::{Error, Result};
use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

/// Resolves relative paths against the project root or a named location.
///
/// Injected into the registry and the rule engine so that neither hard-codes
/// where a project lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locations {
    root: PathBuf,
    named: BTreeMap<String, PathBuf>,
}

impl Locations {
    /// Create locations rooted at `root`
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: normalize(root.as_ref()),
            named: BTreeMap::new(),
        }
    }

    /// The project root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Register a named location; relative paths are taken from the root.
    pub fn add_location<P: AsRef<Path>>(&mut self, name: &str, path: P) -> &mut Self {
        let resolved = self.join(path);
        self.named.insert(name.to_string(), resolved);
        self
    }

    /// Join a relative path onto the root. Absolute paths are returned as-is.
    pub fn join<P: AsRef<Path>>(&self, relative: P) -> PathBuf {
        normalize(&self.root.join(relative.as_ref()))
    }

    /// Join a relative path onto a named location.
    pub fn join_from<P: AsRef<Path>>(&self, location: &str, relative: P) -> Result<PathBuf> {
        let base = self.named.get(location).ok_or_else(|| Error::ConfigParse {
            message: format!("Unknown location '{}'", location),
            hint: Some(format!(
                "Known locations: {}",
                self.named.keys().cloned().collect::<Vec<_>>().join(", ")
            )),
        })?;
        Ok(normalize(&base.join(relative.as_ref())))
    }
}

/// Drop `.` components, repeated separators and trailing slashes, and
/// resolve `..` lexically against the component before it.
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                // `..` at the root stays at the root.
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(component),
            },
            other => normalized.push(other),
        }
    }
    normalized
}

/// Render a path with forward slashes, as used in rule patterns.
pub fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn compile(pattern: &str) -> Result<Glob> {
    Ok(GlobBuilder::new(pattern).literal_separator(true).build()?)
}

/// Match a path against a glob pattern. `{a,b}` alternations are supported
/// and `*` does not cross directory separators.
pub fn glob_match(pattern: &str, path: &str) -> Result<bool> {
    Ok(compile(pattern)?.compile_matcher().is_match(path))
}

/// Compile a list of glob patterns into one set, with the same options as
/// [`glob_match`].
pub fn glob_set<S: AsRef<str>>(patterns: &[S]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(compile(pattern.as_ref())?);
    }
    Ok(builder.build()?)
}
