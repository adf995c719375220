//! Environment variable access.
//!
//! Only browser target configuration reads the environment, and it does so
//! through [`Environment`] so tests never have to mutate the real process
//! environment.

use std::collections::HashMap;

/// Read access to named variables.
pub trait Environment {
    /// Get a variable, `None` when it is not set.
    fn get(&self, name: &str) -> Option<String>;

    /// Get a variable, falling back to `fallback` when it is not set.
    fn get_or(&self, name: &str, fallback: &str) -> String {
        self.get(name).unwrap_or_else(|| fallback.to_string())
    }
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// A fixed set of variables.
#[derive(Debug, Clone, Default)]
pub struct MemoryEnvironment {
    vars: HashMap<String, String>,
}

impl MemoryEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable, builder style.
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }
}

impl Environment for MemoryEnvironment {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}
