//! # Project Integration
//!
//! Locates the hook configuration of a Python project and renders its readme.
//!
//! The hook table lives in a different place depending on the build backend
//! named in `[build-system]`:
//!
//! | Backend          | Table                                               |
//! |------------------|-----------------------------------------------------|
//! | `hatchling`      | `tool.hatch.metadata.hooks.fancy-pypi-readme`, or `metadata.hooks.fancy-pypi-readme` in `hatch.toml` |
//! | `pdm-backend`    | `tool.hatch.metadata.hooks.fancy-pypi-readme`       |
//! | `setuptools`     | `tool.fancy-pypi-readme`                            |
//!
//! Validation messages are prefixed with the dotted location of the table the
//! configuration was read from.

use crate::builder::{self, Placeholders, Readme};
use crate::config::{Config, Validator};
use crate::error::{Error, Result};
use log::{debug, info};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the hook table in every backend.
pub const HOOK_NAME: &str = "fancy-pypi-readme";

/// Build backends the hook can be configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Hatchling,
    PdmBackend,
    Setuptools,
}

impl Backend {
    /// The backend named by `[build-system].build-backend`, defaulting to hatchling.
    pub fn detect(pyproject: &toml::Table) -> Self {
        let backend = pyproject
            .get("build-system")
            .and_then(|bs| bs.get("build-backend"))
            .and_then(toml::Value::as_str)
            .unwrap_or_default();

        if backend.starts_with("pdm.backend") {
            Backend::PdmBackend
        } else if backend.starts_with("setuptools") {
            Backend::Setuptools
        } else {
            Backend::Hatchling
        }
    }

    /// Dotted location of the parent of the hook table in `pyproject.toml`.
    pub fn config_prefix(&self) -> &'static str {
        match self {
            Backend::Hatchling | Backend::PdmBackend => "tool.hatch.metadata.hooks",
            Backend::Setuptools => "tool",
        }
    }

    /// Whether the backend also reads a `hatch.toml` next to `pyproject.toml`.
    pub fn reads_hatch_toml(&self) -> bool {
        matches!(self, Backend::Hatchling)
    }

    fn pyproject_location(&self) -> String {
        format!("{}.{}", self.config_prefix(), HOOK_NAME)
    }

    fn describe_locations(&self) -> String {
        let mut location = format!("`[{}]` in pyproject.toml", self.pyproject_location());
        if self.reads_hatch_toml() {
            location.push_str(&format!(" or `[{}]` in hatch.toml", HATCH_TOML_LOCATION));
        }
        location
    }
}

const HATCH_TOML_LOCATION: &str = "metadata.hooks.fancy-pypi-readme";

/// The `[project]` table fields the hook cares about.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ProjectMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub dynamic: Vec<String>,
}

/// A hook table located in one of the project files.
#[derive(Debug, Clone, PartialEq)]
pub struct HookConfig {
    /// Dotted location of the table, used as the message prefix.
    pub location: String,
    pub raw: serde_json::Value,
}

/// A Python project: its `pyproject.toml`, an optional `hatch.toml`, and the
/// directory fragment paths are relative to.
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    pyproject: toml::Table,
    hatch_toml: toml::Table,
}

impl Project {
    /// Load `pyproject_path` and the hatch.toml to use with it.
    ///
    /// `hatch_toml_path` wins when given; otherwise a `hatch.toml` next to
    /// the pyproject file is used if it exists.
    pub fn load(pyproject_path: &Path, hatch_toml_path: Option<&Path>) -> Result<Self> {
        let pyproject = read_toml(pyproject_path)?;
        let root = match pyproject_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let hatch_toml = match hatch_toml_path {
            Some(path) => read_toml(path)?,
            None => {
                let candidate = root.join("hatch.toml");
                if candidate.is_file() {
                    debug!("Using {}", candidate.display());
                    read_toml(&candidate)?
                } else {
                    toml::Table::new()
                }
            }
        };

        Ok(Self::from_tables(root, pyproject, hatch_toml))
    }

    pub fn from_tables(root: impl Into<PathBuf>, pyproject: toml::Table, hatch_toml: toml::Table) -> Self {
        Self {
            root: root.into(),
            pyproject,
            hatch_toml,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn backend(&self) -> Backend {
        Backend::detect(&self.pyproject)
    }

    /// The `[project]` table, or defaults when it is absent or malformed.
    pub fn metadata(&self) -> ProjectMetadata {
        self.pyproject
            .get("project")
            .and_then(|project| ProjectMetadata::deserialize(project.clone()).ok())
            .unwrap_or_default()
    }

    /// Placeholder values taken from `project.name` and `project.version`.
    pub fn placeholders(&self) -> Placeholders {
        let metadata = self.metadata();
        Placeholders {
            package_name: metadata.name,
            version: metadata.version,
        }
    }

    /// Find the hook table for the detected backend.
    pub fn hook_config(&self) -> Result<HookConfig> {
        if !self.metadata().dynamic.iter().any(|d| d == "readme") {
            return Err(Error::ReadmeNotDynamic);
        }

        let backend = self.backend();
        let location = backend.pyproject_location();
        let in_pyproject = lookup(&self.pyproject, &location);
        let in_hatch_toml = if backend.reads_hatch_toml() {
            lookup(&self.hatch_toml, HATCH_TOML_LOCATION)
        } else {
            None
        };

        let (location, table) = match (in_pyproject, in_hatch_toml) {
            (Some(_), Some(_)) => return Err(Error::AmbiguousConfiguration),
            (_, Some(table)) => (HATCH_TOML_LOCATION.to_string(), table),
            (Some(table), None) => (location, table),
            (None, None) => {
                return Err(Error::MissingConfiguration {
                    location: backend.describe_locations(),
                })
            }
        };

        if !table.is_table() {
            return Err(Error::NotATable { location });
        }
        debug!("Using hook configuration at {}", location);

        Ok(HookConfig {
            location,
            raw: serde_json::to_value(table)?,
        })
    }

    /// Locate and validate the hook configuration.
    pub fn config(&self) -> Result<Config> {
        let hook = self.hook_config()?;
        let config = Validator::new()
            .with_prefix(&hook.location)
            .with_root(&self.root)
            .validate(&hook.raw)?;
        Ok(config)
    }

    /// Locate, validate and render the readme.
    pub fn render(&self) -> Result<Readme> {
        let config = self.config()?;
        let readme = builder::build(config, &self.placeholders());
        info!("Rendered {} readme ({} bytes)", readme.content_type, readme.text.len());
        Ok(readme)
    }
}

fn read_toml(path: &Path) -> Result<toml::Table> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

/// Walk a dotted location through nested tables. Keys may contain dashes but
/// not dots.
fn lookup<'a>(table: &'a toml::Table, location: &str) -> Option<&'a toml::Value> {
    let mut keys = location.split('.');
    let first = table.get(keys.next()?)?;
    keys.try_fold(first, |value, key| value.get(key))
}
