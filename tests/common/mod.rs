//! Shared test utilities for integration and E2E tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_config(configs::TWO_TARGETS);
//!     fixture.command().arg("targets").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::Path;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::configs;
    pub use super::TestFixture;
}

/// Project configuration snippets.
#[allow(dead_code)]
pub mod configs {
    /// One node and one browser target, the browser one named after the project.
    pub const TWO_TARGETS: &str = r#"
name: web
targets:
  api:
    type: node
    includeModules: [shared-lib]
  web:
    type: browser
    includeModules: [ui-kit]
"#;

    /// A browser target embedding another one.
    pub const WITH_INCLUDES: &str = r#"
targets:
  widgets:
    type: browser
  site:
    type: browser
    includeTargets: [widgets]
"#;

    /// A browser target with dynamic configuration enabled.
    pub const BROWSER_CONFIG: &str = r#"
targets:
  web:
    type: browser
    configuration:
      enabled: true
      default:
        api:
          url: https://example.com
        debug: false
"#;

    /// A target whose type has no template.
    pub const INVALID_TYPE: &str = r#"
targets:
  edge:
    type: browsr
"#;
}

/// A temporary project directory.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write `build-targets.config.yaml` with the given content.
    pub fn with_config(self, content: &str) -> Self {
        self.with_file("build-targets.config.yaml", content)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// A command for the binary, rooted at the fixture through `--root`.
    #[allow(dead_code)]
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::Command::cargo_bin("build-targets")
            .expect("Failed to find build-targets binary");
        cmd.env_remove("BUILD_TARGETS_ROOT")
            .env_remove("RUST_LOG")
            .env_remove("CONFIG")
            .arg("--root")
            .arg(self.path());
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
