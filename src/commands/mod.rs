//! # CLI Command Implementations
//!
//! Each subcommand of the `fancy-readme` tool lives in its own file with:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and calls into the
//!   `fancy_readme` library.

pub mod render;
pub mod validate;

use anyhow::{Context, Result};
use fancy_readme::project::Project;
use std::path::Path;

/// Load the project both commands operate on.
fn load_project(pyproject: &Path, hatch_toml: Option<&Path>) -> Result<Project> {
    Project::load(pyproject, hatch_toml)
        .with_context(|| format!("Failed to load project from {}", pyproject.display()))
}
