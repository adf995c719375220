//! # Error Suggestions
//!
//! Helpers that turn resolution failures into messages that say what went
//! wrong and how to fix it. The command-line tool routes every library error
//! through [`explain`] before printing it.
//!
//! ```rust,ignore
//! use build_targets::suggestions;
//!
//! let target = registry
//!     .get_target(name)
//!     .map_err(|e| suggestions::explain(e, Some(&registry)))?;
//! ```

use crate::defaults::{PROJECT_CONFIG_FILENAMES, ROOT_ENV_VAR};
use crate::error::Error;
use crate::targets::TargetRegistry;
use std::path::Path;

/// Generate an error for a target name that is not declared.
///
/// Suggests the closest declared name when there is one.
pub fn target_not_found(name: &str, available: &[&str]) -> anyhow::Error {
    let did_you_mean = find_similar(name, available)
        .map(|s| format!("\nhint: Did you mean '{s}'?"))
        .unwrap_or_default();
    let known = if available.is_empty() {
        "none".to_string()
    } else {
        available.join(", ")
    };

    anyhow::anyhow!(
        "The required target doesn't exist: {name}{did_you_mean}\n\n\
         Declared targets: {known}\n\
         hint: Run 'build-targets targets' to list the resolved targets"
    )
}

/// Generate an error for a project without (matching) targets.
pub fn no_targets(target_type: Option<&str>) -> anyhow::Error {
    let subject = match target_type {
        Some(target_type) => format!("No targets of type '{target_type}' found"),
        None => "No targets found".to_string(),
    };

    anyhow::anyhow!(
        "{subject}\n\n\
         hint: Declare targets under 'targets:' in {file}\n\
         hint: Use --root or {ROOT_ENV_VAR} if the project lives elsewhere",
        file = PROJECT_CONFIG_FILENAMES[0]
    )
}

/// Generate an error for a file outside every target's source directory.
pub fn file_owner_not_found(path: &Path, sources: &[&Path]) -> anyhow::Error {
    let listed = sources
        .iter()
        .map(|source| format!("  {}", source.display()))
        .collect::<Vec<_>>()
        .join("\n");

    anyhow::anyhow!(
        "A target for the following file couldn't be found: {path}\n\n\
         Target source directories:\n{listed}\n\
         hint: Relative paths are resolved from the project root",
        path = path.display()
    )
}

/// Generate an error for a target type without a template.
pub fn invalid_target_type(target: &str, target_type: &str, known: &[&str]) -> anyhow::Error {
    let did_you_mean = find_similar(target_type, known)
        .map(|s| format!("\nhint: Did you mean '{s}'?"))
        .unwrap_or_default();

    anyhow::anyhow!(
        "Invalid type for target '{target}': '{target_type}'{did_you_mean}\n\n\
         Valid types are: {types}\n\
         hint: Register a template under 'targetsTemplates' to add a type",
        types = known.join(", ")
    )
}

/// Attach hints to a library error, using the registry for context when it
/// is available.
pub fn explain(error: Error, registry: Option<&TargetRegistry>) -> anyhow::Error {
    match (error, registry) {
        (Error::TargetNotFound { name }, Some(registry)) => {
            let names: Vec<&str> = registry.targets().names().collect();
            target_not_found(&name, &names)
        }
        (Error::TargetNotFound { name }, None) => target_not_found(&name, &[]),
        (Error::NoTargets { target_type }, _) => no_targets(target_type.as_deref()),
        (Error::FileOwnerNotFound { path }, Some(registry)) => {
            let sources: Vec<&Path> = registry
                .targets()
                .iter()
                .map(|target| target.paths.source.as_path())
                .collect();
            file_owner_not_found(&path, &sources)
        }
        (error, _) => anyhow::Error::new(error),
    }
}

/// Find a similar string from a list of candidates using edit distance.
///
/// Returns Some(candidate) if a close match is found (edit distance <= 2).
fn find_similar<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|&candidate| {
            let distance = edit_distance(input, candidate);
            (distance <= 2 && distance < input.len()).then_some((candidate, distance))
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Levenshtein distance over chars, one row at a time.
fn edit_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();

    for (i, a_char) in a.chars().enumerate() {
        let mut current = vec![i + 1; b_chars.len() + 1];
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != *b_char);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        previous = current;
    }

    previous[b_chars.len()]
}
