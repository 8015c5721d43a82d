//! # Configuration Validation
//!
//! This module turns the loosely typed hook configuration into a [`Config`].
//!
//! ## Shape
//!
//! ```toml
//! [tool.hatch.metadata.hooks.fancy-pypi-readme]
//! content-type = "text/markdown"
//!
//! [[tool.hatch.metadata.hooks.fancy-pypi-readme.fragments]]
//! text = "# Header\n\n"
//!
//! [[tool.hatch.metadata.hooks.fancy-pypi-readme.fragments]]
//! path = "README.md"
//! start-after = "<!-- start -->"
//!
//! [[tool.hatch.metadata.hooks.fancy-pypi-readme.substitutions]]
//! pattern = "#(\\d+)"
//! replacement = "[#\\1](https://github.com/org/repo/issues/\\1)"
//! ```
//!
//! ## Validation
//!
//! Every check runs regardless of earlier failures: a missing `content-type`
//! does not hide a broken fragment. All messages are returned together as one
//! [`ConfigurationError`], each prefixed with its dotted location.
//!
//! The raw mapping is a [`serde_json::Value`] so any collaborator can supply
//! it; TOML tables convert with `serde_json::to_value`.

use crate::error::{ConfigurationError, ErrorCollector};
use crate::fragments::{self, Fragment};
use crate::path::FieldPath;
use crate::schema;
use crate::substitutions::{self, Substituter};
use log::{debug, info};
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Where hatchling looks for the hook configuration in `pyproject.toml`.
pub const DEFAULT_PREFIX: &str = "tool.hatch.metadata.hooks.fancy-pypi-readme";

const CONTENT_TYPE: &str = "content-type";
const FRAGMENTS: &str = "fragments";
const SUBSTITUTIONS: &str = "substitutions";

const FIELDS: &[&str] = &[CONTENT_TYPE, FRAGMENTS, SUBSTITUTIONS];

/// The markup dialect of the rendered readme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Markdown,
    ReStructuredText,
}

impl ContentType {
    /// Every accepted content type, in the order they are listed in messages.
    pub const ALL: [ContentType; 2] = [ContentType::Markdown, ContentType::ReStructuredText];

    /// The MIME type written to the package metadata.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Markdown => "text/markdown",
            ContentType::ReStructuredText => "text/x-rst",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentType::ALL
            .into_iter()
            .find(|ct| ct.as_str() == s)
            .ok_or_else(|| {
                let allowed = ContentType::ALL
                    .iter()
                    .map(|ct| format!("'{}'", ct.as_str()))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("'{}' is not one of [{}]", s, allowed)
            })
    }
}

/// A validated hook configuration.
///
/// Built once per render by [`Validator::validate`] and consumed by
/// [`crate::builder::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub content_type: ContentType,
    pub fragments: Vec<Fragment>,
    pub substitutions: Vec<Substituter>,
}

/// Validates raw hook configurations.
///
/// ```
/// use fancy_readme::config::{ContentType, Validator};
/// use serde_json::json;
///
/// let raw = json!({
///     "content-type": "text/markdown",
///     "fragments": [{"text": "# Hello"}],
/// });
/// let config = Validator::new().validate(&raw).unwrap();
/// assert_eq!(config.content_type, ContentType::Markdown);
///
/// let err = Validator::new().with_prefix("tool.fancy-pypi-readme").validate(&json!({})).unwrap_err();
/// assert_eq!(err.errors(), [
///     "tool.fancy-pypi-readme.content-type is missing.",
///     "tool.fancy-pypi-readme.fragments is missing.",
/// ]);
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    prefix: FieldPath,
    root: PathBuf,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// A validator reporting under [`DEFAULT_PREFIX`] and reading fragment
    /// files relative to the current directory.
    pub fn new() -> Self {
        Self {
            prefix: FieldPath::with_prefix(DEFAULT_PREFIX),
            root: PathBuf::from("."),
        }
    }

    /// Report locations under `prefix` instead.
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = FieldPath::with_prefix(prefix);
        self
    }

    /// Resolve relative fragment paths against `root`.
    pub fn with_root(mut self, root: impl AsRef<Path>) -> Self {
        self.root = root.as_ref().to_path_buf();
        self
    }

    /// Validate `raw`, returning the typed configuration or every problem found.
    pub fn validate(&self, raw: &Value) -> Result<Config, ConfigurationError> {
        let path = &self.prefix;
        let map = schema::as_object(raw, path)?;
        let mut errors = ErrorCollector::new();

        let content_type = match map.get(CONTENT_TYPE) {
            None => {
                errors.push(schema::missing(path, CONTENT_TYPE));
                None
            }
            Some(value) => self.content_type(value, &path.key(CONTENT_TYPE), &mut errors),
        };

        let fragments = match map.get(FRAGMENTS) {
            None => {
                errors.push(schema::missing(path, FRAGMENTS));
                None
            }
            Some(value) => self.fragments(value, &path.key(FRAGMENTS), &mut errors),
        };

        let substitutions = match map.get(SUBSTITUTIONS) {
            None => Some(Vec::new()),
            Some(value) => self.substitutions(value, &path.key(SUBSTITUTIONS), &mut errors),
        };

        schema::check_fields(map, FIELDS, path, &mut errors);

        let config = errors.finish_with(|| {
            Some(Config {
                content_type: content_type?,
                fragments: fragments?,
                substitutions: substitutions?,
            })
        })?;
        info!(
            "Validated configuration: {} fragment(s), {} substitution(s), {}",
            config.fragments.len(),
            config.substitutions.len(),
            config.content_type
        );
        Ok(config)
    }

    fn content_type(
        &self,
        value: &Value,
        path: &FieldPath,
        errors: &mut ErrorCollector,
    ) -> Option<ContentType> {
        let Some(s) = value.as_str() else {
            errors.push(schema::wrong_type(path, value, "string"));
            return None;
        };
        match s.parse() {
            Ok(content_type) => Some(content_type),
            Err(msg) => {
                errors.push(format!("{}: {}", path, msg));
                None
            }
        }
    }

    fn fragments(
        &self,
        value: &Value,
        path: &FieldPath,
        errors: &mut ErrorCollector,
    ) -> Option<Vec<Fragment>> {
        let entries = errors.absorb(schema::as_array(value, path))?;
        if entries.is_empty() {
            errors.push(schema::must_not_be_empty(path));
            return None;
        }
        debug!("Resolving {} fragment(s)", entries.len());
        errors.absorb(fragments::resolve_all(entries, path, &self.root))
    }

    fn substitutions(
        &self,
        value: &Value,
        path: &FieldPath,
        errors: &mut ErrorCollector,
    ) -> Option<Vec<Substituter>> {
        let entries = errors.absorb(schema::as_array(value, path))?;
        debug!("Resolving {} substitution(s)", entries.len());
        errors.absorb(substitutions::resolve_all(entries, path))
    }
}

/// Validate `raw` with the default prefix, relative to the current directory.
pub fn validate(raw: &Value) -> Result<Config, ConfigurationError> {
    Validator::new().validate(raw)
}
