//! Configuration fixture tests using datatest-stable for test data discovery
//!
//! Every `*.toml` file in `tests/testdata/configs` is a raw hook table. Each
//! one must validate, with file fragments resolved against `tests/testdata`,
//! and render exactly to the `*.out` file next to it.

use fancy_readme::builder::{build, Placeholders};
use fancy_readme::config::Validator;
use std::path::Path;

fn test_config_fixture(path: &Path) -> datatest_stable::Result<()> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read test file {}: {}", path.display(), e))?;
    let table: toml::Table = toml::from_str(&content)
        .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;
    let raw = serde_json::to_value(table)?;

    let config = Validator::new()
        .with_root("tests/testdata")
        .validate(&raw)
        .map_err(|e| format!("{} did not validate: {}", path.display(), e))?;

    assert!(
        !config.fragments.is_empty(),
        "Config in {} should contain at least one fragment",
        path.display()
    );

    let expected_path = path.with_extension("out");
    let expected = std::fs::read_to_string(&expected_path)
        .map_err(|e| format!("Failed to read {}: {}", expected_path.display(), e))?;

    let readme = build(config, &Placeholders::new("fixture-pkg", "0.0.1"));
    assert_eq!(
        readme.text,
        expected,
        "Rendered {} does not match {}",
        path.display(),
        expected_path.display()
    );

    Ok(())
}

datatest_stable::harness!(test_config_fixture, "tests/testdata/configs", r".*\.toml$");
