//! # Extension Hooks
//!
//! Plugins extend resolution by registering named transform functions. A
//! [`Reducer`] threads a value through every handler registered for a list of
//! hook names: names in the order given, handlers in registration order, each
//! output feeding the next. A name with no handlers passes the value through
//! unchanged. An [`Emitter`] is the informational counterpart: listeners see
//! the value but cannot replace it.

use crate::rules::{FileRule, TargetRules};
use crate::targets::Target;
use std::fmt;

/// Reduces a just-normalized target; the output replaces the target.
pub const TARGET_LOAD: &str = "target-load";
/// Reduces a file rule after the first target was added.
pub const TARGET_FILE_RULE: &str = "target-file-rule";
/// Additionally reduces a file rule after every later target was added.
pub const TARGET_FILE_RULE_UPDATE: &str = "target-file-rule-update";
/// Emitted with the complete rule bundle for a target.
pub const TARGET_FILE_RULES: &str = "target-file-rules";
pub const TARGET_JS_FILES_RULE: &str = "target-js-files-rule";
pub const TARGET_SCSS_FILES_RULE: &str = "target-scss-files-rule";
pub const TARGET_CSS_FILES_RULE: &str = "target-css-files-rule";
pub const TARGET_COMMON_FONT_FILES_RULE: &str = "target-common-font-files-rule";
pub const TARGET_SVG_FONT_FILES_RULE: &str = "target-svg-font-files-rule";
pub const TARGET_IMAGE_FILES_RULE: &str = "target-image-files-rule";
pub const TARGET_FAVICON_FILES_RULE: &str = "target-favicon-files-rule";

type Handler<T, C> = Box<dyn Fn(T, &C) -> T>;
type Listener<T, C> = Box<dyn Fn(&T, &C)>;

/// Ordered list of named transform functions over values of type `T`, with
/// read-only context `C`.
pub struct Reducer<T, C> {
    handlers: Vec<(String, Handler<T, C>)>,
}

impl<T, C> Default for Reducer<T, C> {
    fn default() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }
}

impl<T, C> Reducer<T, C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for `name`.
    pub fn on<F>(&mut self, name: &str, handler: F) -> &mut Self
    where
        F: Fn(T, &C) -> T + 'static,
    {
        self.handlers.push((name.to_string(), Box::new(handler)));
        self
    }

    /// Thread `value` through the handlers of each name in `names`.
    pub fn reduce(&self, names: &[&str], value: T, context: &C) -> T {
        names.iter().fold(value, |value, name| {
            self.handlers
                .iter()
                .filter(|(registered, _)| registered == name)
                .fold(value, |value, (_, handler)| handler(value, context))
        })
    }

    /// Whether any handler is registered for `name`.
    pub fn has(&self, name: &str) -> bool {
        self.handlers.iter().any(|(registered, _)| registered == name)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<T, C> fmt::Debug for Reducer<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.handlers.iter().map(|(name, _)| name))
            .finish()
    }
}

/// Named informational listeners over values of type `T`.
pub struct Emitter<T, C> {
    listeners: Vec<(String, Listener<T, C>)>,
}

impl<T, C> Default for Emitter<T, C> {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }
}

impl<T, C> Emitter<T, C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for `name`.
    pub fn on<F>(&mut self, name: &str, listener: F) -> &mut Self
    where
        F: Fn(&T, &C) + 'static,
    {
        self.listeners.push((name.to_string(), Box::new(listener)));
        self
    }

    /// Call every listener registered for `name`, in registration order.
    pub fn emit(&self, name: &str, value: &T, context: &C) {
        self.listeners
            .iter()
            .filter(|(registered, _)| registered == name)
            .for_each(|(_, listener)| listener(value, context));
    }
}

impl<T, C> fmt::Debug for Emitter<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.listeners.iter().map(|(name, _)| name))
            .finish()
    }
}

/// Every hook the resolution core exposes, grouped by value type.
#[derive(Debug, Default)]
pub struct Events {
    /// `target-load`
    pub targets: Reducer<Target, ()>,
    /// `target-file-rule`, `target-file-rule-update`
    pub file_rules: Reducer<FileRule, Target>,
    /// Per-category informational hooks (`target-js-files-rule`, ...)
    pub rule_listeners: Emitter<FileRule, Target>,
    /// `target-file-rules`
    pub bundle_listeners: Emitter<TargetRules, Target>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_reduce_without_handlers_passes_through() {
        let reducer: Reducer<Vec<&str>, ()> = Reducer::new();
        assert!(reducer.is_empty());
        assert_eq!(reducer.reduce(&["anything"], vec!["x"], &()), vec!["x"]);
    }

    #[test]
    fn test_reduce_applies_names_then_registration_order() {
        let mut reducer: Reducer<Vec<String>, ()> = Reducer::new();
        reducer
            .on("second", |mut v, _| {
                v.push("second-1".to_string());
                v
            })
            .on("first", |mut v, _| {
                v.push("first-1".to_string());
                v
            })
            .on("first", |mut v, _| {
                v.push("first-2".to_string());
                v
            });

        let out = reducer.reduce(&["first", "second"], Vec::new(), &());
        assert_eq!(out, vec!["first-1", "first-2", "second-1"]);
        assert!(reducer.has("first"));
        assert!(!reducer.has("third"));
        assert_eq!(reducer.len(), 3);
    }

    #[test]
    fn test_reduce_passes_context() {
        let mut reducer: Reducer<i64, i64> = Reducer::new();
        reducer.on("add", |v, ctx| v + ctx);
        assert_eq!(reducer.reduce(&["add", "add"], 1, &10), 21);
    }

    #[test]
    fn test_emit_only_matching_listeners() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut emitter: Emitter<u32, &str> = Emitter::new();
        let a = seen.clone();
        emitter.on("a", move |v, ctx| a.borrow_mut().push(format!("a:{}:{}", v, ctx)));
        let b = seen.clone();
        emitter.on("b", move |v, _| b.borrow_mut().push(format!("b:{}", v)));

        emitter.emit("a", &7, &"ctx");
        emitter.emit("c", &8, &"ctx");

        assert_eq!(*seen.borrow(), vec!["a:7:ctx".to_string()]);
    }

    #[test]
    fn test_debug_lists_hook_names() {
        let mut reducer: Reducer<u8, ()> = Reducer::new();
        reducer.on(TARGET_LOAD, |v, _| v);
        assert_eq!(format!("{:?}", reducer), "[\"target-load\"]");
    }
}
