//! Project fixture tests using datatest-stable for test data discovery
//!
//! Every YAML file in `tests/testdata` is a project configuration. Each one
//! must resolve, produce a rule bundle for every target, and satisfy the
//! expectations listed under its optional `expect` key:
//!
//! ```yaml
//! expect:
//!   default: web
//!   owners:
//!     src/web/index.js: web
//! ```

use build_targets::config::{ConfigLayer, MemoryModuleLoader, ProjectConfig, ProjectConfiguration};
use build_targets::path::Locations;
use build_targets::rules::{Category, TargetsFileRules};
use build_targets::targets::TargetRegistry;
use serde_json::Value;
use std::path::Path;
use std::rc::Rc;

const ROOT: &str = "/project";

/// Asset files that must be claimed by exactly one category, relative to a
/// target's source directory.
const EXCLUSIVE_ASSETS: &[(&str, Category)] = &[
    ("fonts/icons.svg", Category::SvgFonts),
    ("assets/fonts/nested/glyphs.svg", Category::SvgFonts),
    ("favicon.ico", Category::Favicon),
    ("favicon.png", Category::Favicon),
    ("images/logo.svg", Category::Images),
    ("fonts/regular.woff2", Category::CommonFonts),
];

fn test_project_fixture(path: &Path) -> datatest_stable::Result<()> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read fixture {}: {}", path.display(), e))?;
    let overrides: Value = serde_yaml::from_str(&content)
        .map_err(|e| format!("Failed to parse fixture {}: {}", path.display(), e))?;
    let expect = overrides.get("expect").cloned().unwrap_or(Value::Null);

    let mut loader = MemoryModuleLoader::new();
    loader.add_value(format!("{}/build-targets.config.yaml", ROOT), overrides);
    let layer = ProjectConfiguration::layered(Path::new(ROOT), Rc::new(loader));
    let project = ProjectConfig::from_value(layer.get_config(&[])?)?;
    let registry = TargetRegistry::new(project, Locations::new(ROOT))
        .map_err(|e| format!("Fixture {} failed to resolve: {}", path.display(), e))?;

    let engine = TargetsFileRules::new(&registry);
    for target in registry.targets() {
        assert!(
            target.paths.source.starts_with(ROOT),
            "{}: source of '{}' escapes the project",
            path.display(),
            target.name
        );
        assert_eq!(target.is.node, target.target_type == "node");
        assert_eq!(target.is.browser, target.target_type == "browser");

        let rules = engine.get_rules_for_target(target)?;
        let source = target.paths.source.to_string_lossy().replace('\\', "/");
        for (asset, category) in EXCLUSIVE_ASSETS {
            let file = format!("{}/{}", source, asset);
            assert_eq!(
                rules.categories_for(&file),
                vec![*category],
                "{}: '{}' in target '{}'",
                path.display(),
                asset,
                target.name
            );
        }
    }

    if let Some(default) = expect.get("default").and_then(Value::as_str) {
        assert_eq!(registry.get_default_target(None)?.name, default);
    }
    if let Some(owners) = expect.get("owners").and_then(Value::as_object) {
        for (file, owner) in owners {
            assert_eq!(
                Some(registry.find_target_for_file(file)?.name.as_str()),
                owner.as_str(),
                "{}: owner of {}",
                path.display(),
                file
            );
        }
    }
    if let Some(count) = expect.get("targets").and_then(Value::as_u64) {
        assert_eq!(registry.targets().len() as u64, count);
    }

    Ok(())
}

// Register datatest harness to discover and run tests on all YAML files in testdata directory
datatest_stable::harness!(test_project_fixture, "tests/testdata", r".*\.yaml$");
