//! # Error Handling
//!
//! This module defines the two error types used by `fancy-readme`.
//!
//! ## Key Components
//!
//! - **`ConfigurationError`**: The single error kind produced by validation. It
//!   carries every human-readable message collected during one validation
//!   pass, each prefixed with the dotted path of the offending location
//!   (e.g. `tool.hatch.metadata.hooks.fancy-pypi-readme.fragments.0.text`).
//!
//! - **`ErrorCollector`**: Accumulates messages from independent checks so
//!   that a failing check never hides the result of its siblings.
//!
//! - **`Error`**: The crate-wide enum used by the project glue. It wraps a
//!   `ConfigurationError` transparently and adds the failures that happen
//!   before validation starts (unreadable files, malformed TOML, missing or
//!   ambiguous hook configuration).
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.

use std::path::PathBuf;
use thiserror::Error;

/// The configuration is invalid.
///
/// Holds one message per violated constraint, in the order the checks ran.
/// Raising it means the whole validation pass failed; it never carries a
/// partially validated configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration has errors:\n\n{}", bullet_list(.errors))]
pub struct ConfigurationError {
    errors: Vec<String>,
}

fn bullet_list(errors: &[String]) -> String {
    errors
        .iter()
        .map(|e| format!("- {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}

impl ConfigurationError {
    /// Create an error from a non-empty list of messages.
    pub fn new(errors: Vec<String>) -> Self {
        debug_assert!(!errors.is_empty(), "ConfigurationError without messages");
        Self { errors }
    }

    /// Create an error carrying exactly one message.
    pub fn single(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
        }
    }

    /// The collected messages, in order.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Consume the error and return its messages.
    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }

    /// Append the messages of `other` after our own.
    pub fn merge(&mut self, other: ConfigurationError) {
        self.errors.extend(other.errors);
    }
}

/// Accumulates validation messages across independent checks.
///
/// ```
/// use fancy_readme::error::{ConfigurationError, ErrorCollector};
///
/// let mut errors = ErrorCollector::new();
/// let ok: Result<u8, ConfigurationError> = Ok(1);
/// let bad: Result<u8, ConfigurationError> = Err(ConfigurationError::single("b is missing."));
///
/// assert_eq!(errors.absorb(ok), Some(1));
/// assert_eq!(errors.absorb(bad), None);
/// errors.push("c is missing.");
///
/// let err = errors.finish(()).unwrap_err();
/// assert_eq!(err.errors(), ["b is missing.", "c is missing."]);
/// ```
#[derive(Debug, Default)]
pub struct ErrorCollector {
    errors: Vec<String>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a single message.
    pub fn push(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Keep the value of a successful sub-validation, or record its messages.
    pub fn absorb<T>(&mut self, result: std::result::Result<T, ConfigurationError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.errors.extend(e.errors);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Return `value` if nothing was recorded, otherwise every message as one error.
    pub fn finish<T>(self, value: T) -> std::result::Result<T, ConfigurationError> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(ConfigurationError::new(self.errors))
        }
    }

    /// Like [`finish`](Self::finish), for callers that only know the value
    /// exists once every check passed.
    pub fn finish_with<T>(
        self,
        value: impl FnOnce() -> Option<T>,
    ) -> std::result::Result<T, ConfigurationError> {
        if !self.errors.is_empty() {
            return Err(ConfigurationError::new(self.errors));
        }
        value().ok_or_else(|| ConfigurationError::single("configuration could not be assembled."))
    }
}

/// Main error type for fancy-readme operations
#[derive(Error, Debug)]
pub enum Error {
    /// The hook configuration failed validation.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// A project file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The project does not declare its readme as dynamic metadata.
    #[error("You must add 'readme' to 'project.dynamic'.")]
    ReadmeNotDynamic,

    /// No hook configuration was found where the build backend looks for it.
    #[error("Missing configuration ({location})")]
    MissingConfiguration { location: String },

    /// Both pyproject.toml and hatch.toml configure the hook.
    #[error("Both pyproject.toml and hatch.toml contain fancy-pypi-readme configuration.")]
    AmbiguousConfiguration,

    /// The hook configuration exists but is not a table.
    #[error("Expected a table at `{location}`")]
    NotATable { location: String },

    /// A TOML parsing error, wrapped from `toml::de::Error`.
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A conversion error, wrapped from `serde_json::Error`.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
