//! Shared test utilities for integration and E2E tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_pyproject(pyprojects::HATCHLING_TEXT_ONLY);
//!     fixture.command().arg("render").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::pyprojects;
    #[allow(unused_imports)]
    pub use super::testdata_dir;
    pub use super::TestFixture;
}

/// Common `pyproject.toml` snippets for testing.
#[allow(dead_code)]
pub mod pyprojects {
    /// Hatchling project with a text-only configuration.
    pub const HATCHLING_TEXT_ONLY: &str = r##"
[build-system]
requires = ["hatchling", "hatch-fancy-pypi-readme"]
build-backend = "hatchling.build"

[project]
name = "my-pkg"
version = "1.0.0"
dynamic = ["readme"]

[tool.hatch.metadata.hooks.fancy-pypi-readme]
content-type = "text/markdown"
fragments = [{ text = "# $HFPR_PACKAGE_NAME\n\n" }, { text = "Version $HFPR_VERSION." }]
"##;

    /// Hatchling project whose hook table lives in `hatch.toml`.
    pub const HATCHLING_WITHOUT_TABLE: &str = r##"
[build-system]
build-backend = "hatchling.build"

[project]
name = "my-pkg"
version = "2.0"
dynamic = ["readme"]
"##;

    /// `hatch.toml` counterpart of [`HATCHLING_WITHOUT_TABLE`].
    pub const HATCH_TOML: &str = r##"
[metadata.hooks.fancy-pypi-readme]
content-type = "text/x-rst"
fragments = [{ text = "From hatch.toml" }]
"##;

    /// Project that forgot to declare its readme as dynamic.
    pub const NOT_DYNAMIC: &str = r##"
[build-system]
build-backend = "hatchling.build"

[project]
name = "my-pkg"
version = "1.0.0"

[tool.hatch.metadata.hooks.fancy-pypi-readme]
content-type = "text/markdown"
fragments = [{ text = "x" }]
"##;

    /// Hook table present but empty.
    pub const EMPTY_TABLE: &str = r##"
[build-system]
build-backend = "hatchling.build"

[project]
name = "my-pkg"
dynamic = ["readme"]

[tool.hatch.metadata.hooks.fancy-pypi-readme]
"##;

    /// Several independent problems at once.
    pub const MANY_ERRORS: &str = r##"
[build-system]
build-backend = "hatchling.build"

[project]
name = "my-pkg"
dynamic = ["readme"]

[tool.hatch.metadata.hooks.fancy-pypi-readme]
content-type = "text/plain"
fragments = [{ text = "" }, { path = "missing.md" }]
substitutions = [{ pattern = "(" , replacement = "x" }]
"##;

    /// pdm-backend project with a file fragment.
    pub const PDM_WITH_FILE: &str = r##"
[build-system]
build-backend = "pdm.backend"

[project]
name = "pdm-pkg"
version = "0.3"
dynamic = ["readme"]

[tool.hatch.metadata.hooks.fancy-pypi-readme]
content-type = "text/markdown"
fragments = [{ path = "README.md", start-after = "<!-- start -->\n" }]
"##;
}

/// Directory holding the checked-in test data.
#[allow(dead_code)]
pub fn testdata_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("testdata")
}

/// A test fixture that provides a temporary project directory.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new()
///     .with_pyproject(pyprojects::PDM_WITH_FILE)
///     .with_file("README.md", "ignored\n<!-- start -->\nkept");
///
/// fixture.command().arg("render").assert().success();
/// ```
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

    /// Add a `pyproject.toml` with the given content.
    pub fn with_pyproject(self, content: &str) -> Self {
        self.with_file("pyproject.toml", content)
    }

    /// Add a `hatch.toml` with the given content.
    #[allow(dead_code)]
    pub fn with_hatch_toml(self, content: &str) -> Self {
        self.with_file("hatch.toml", content)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Copy a file from `tests/testdata` into the fixture.
    #[allow(dead_code)]
    pub fn with_testdata(self, name: &str) -> Self {
        self.temp_dir
            .child(name)
            .write_file(&testdata_dir().join(name))
            .expect("Failed to copy test data");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the `pyproject.toml`.
    #[allow(dead_code)]
    pub fn pyproject_path(&self) -> PathBuf {
        self.temp_dir.path().join("pyproject.toml")
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command configured to run in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("fancy-readme");
        cmd.current_dir(self.path());
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.path().exists());
    }

    #[test]
    fn test_fixture_with_pyproject() {
        let fixture = TestFixture::new().with_pyproject("[project]");
        assert!(fixture.pyproject_path().exists());
    }

    #[test]
    fn test_pyprojects_are_valid_toml() {
        let snippets = [
            pyprojects::HATCHLING_TEXT_ONLY,
            pyprojects::HATCHLING_WITHOUT_TABLE,
            pyprojects::HATCH_TOML,
            pyprojects::NOT_DYNAMIC,
            pyprojects::EMPTY_TABLE,
            pyprojects::MANY_ERRORS,
            pyprojects::PDM_WITH_FILE,
        ];

        for snippet in snippets {
            toml::from_str::<toml::Table>(snippet).expect("Snippet should be valid TOML");
        }
    }
}
