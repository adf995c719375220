//! Replace-on-conflict deep merge for layered configuration values.
//!
//! Objects are merged key by key. Every other value in `changes`, arrays and
//! `null` included, replaces the value in `base` wholesale. File rules use a
//! different, append-only merge (see [`crate::rules::append_merge`]); the two
//! are deliberately separate functions.

use serde_json::Value;

/// Deep merge two JSON values, with `changes` taking precedence over `base`.
///
/// - Objects are merged recursively: keys in `changes` override keys in `base`
/// - Arrays, strings, numbers, booleans and nulls replace `base` entirely
///
/// # Example
/// ```
/// use serde_json::json;
/// use build_targets::config::deep_merge;
///
/// let base = json!({
///     "paths": { "source": "src", "build": "dist" },
///     "includeModules": ["a", "b"]
/// });
/// let changes = json!({
///     "paths": { "build": "public" },
///     "includeModules": ["c"]
/// });
/// let merged = deep_merge(base, changes);
/// assert_eq!(
///     merged,
///     json!({
///         "paths": { "source": "src", "build": "public" },
///         "includeModules": ["c"]
///     })
/// );
/// ```
pub fn deep_merge(base: Value, changes: Value) -> Value {
    match (base, changes) {
        (Value::Object(mut base_map), Value::Object(changes_map)) => {
            for (key, change) in changes_map {
                match base_map.get_mut(&key) {
                    Some(existing) => {
                        let current = existing.take();
                        *existing = deep_merge(current, change);
                    }
                    None => {
                        base_map.insert(key, change);
                    }
                }
            }
            Value::Object(base_map)
        }
        (_, changes) => changes,
    }
}

/// Merge several layers in order, later layers winning.
pub fn deep_merge_all(layers: impl IntoIterator<Item = Value>) -> Value {
    layers
        .into_iter()
        .fold(Value::Object(Default::default()), deep_merge)
}
