//! # Fancy Readme Library
//!
//! This library renders a package's long description from a declarative
//! configuration: a content type, an ordered list of fragments to
//! concatenate, and a list of regex substitutions applied to the result. It is
//! used by the `fancy-readme` command-line tool and can be embedded by any
//! packaging backend that hands it a raw configuration mapping.
//!
//! ## Quick Example
//!
//! ```
//! use fancy_readme::builder::{build, Placeholders};
//! use fancy_readme::config;
//! use serde_json::json;
//!
//! let raw = json!({
//!     "content-type": "text/markdown",
//!     "fragments": [{"text": "A"}, {"text": "B"}],
//!     "substitutions": [{"pattern": "A", "replacement": "Z"}],
//! });
//!
//! let config = config::validate(&raw).unwrap();
//! let readme = build(config, &Placeholders::default());
//! assert_eq!(readme.content_type.as_str(), "text/markdown");
//! assert_eq!(readme.text, "ZB");
//! ```
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: Validates the raw mapping into a typed
//!   [`config::Config`], collecting every problem into one
//!   [`error::ConfigurationError`].
//! - **Fragments (`fragments`)**: Literal text or file-derived text, sliced
//!   with `start-after`/`start-at`/`end-before` and extracted with `pattern`.
//! - **Substitutions (`substitutions`)**: Regex find-and-replace rules applied
//!   in order.
//! - **Builder (`builder`)**: Concatenates, substitutes and fills in the
//!   `$HFPR_PACKAGE_NAME`/`$HFPR_VERSION` placeholders.
//! - **Project (`project`)**: Finds the hook table in `pyproject.toml` or
//!   `hatch.toml` for the project's build backend.
//!
//! ## Execution Flow
//!
//! 1.  **Validate**: raw mapping to `Config`, or an aggregated error. File
//!     fragments are read here, once.
//! 2.  **Build**: `Config` to rendered text. Pure, never fails.

pub mod builder;
pub mod config;
pub mod error;
pub mod fragments;
pub mod path;
pub mod project;
pub mod schema;
pub mod substitutions;

#[cfg(test)]
mod builder_proptest;
