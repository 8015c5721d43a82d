//! Rendering a validated configuration into readme text.

use crate::config::{Config, ContentType};
use crate::fragments::Fragment;
use crate::substitutions::Substituter;
use log::{debug, warn};

/// Replaced with the package name, when one is supplied.
pub const PACKAGE_NAME_PLACEHOLDER: &str = "$HFPR_PACKAGE_NAME";
/// Replaced with the package version, when one is supplied.
pub const VERSION_PLACEHOLDER: &str = "$HFPR_VERSION";

/// Runtime values substituted for the placeholder tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placeholders {
    pub package_name: Option<String>,
    pub version: Option<String>,
}

impl Placeholders {
    pub fn new(package_name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            package_name: Some(package_name.into()),
            version: Some(version.into()),
        }
    }
}

/// The rendered readme and the content type it is written in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readme {
    pub content_type: ContentType,
    pub text: String,
}

/// Concatenate `fragments`, apply `substitutions` in order, then fill in
/// placeholders.
///
/// ```
/// use fancy_readme::builder::{build_text, Placeholders};
/// use fancy_readme::fragments::Fragment;
///
/// let text = build_text(
///     &[Fragment::text("This is $HFPR_PACKAGE_NAME "), Fragment::text("$HFPR_VERSION!")],
///     &[],
///     &Placeholders::new("your-package", "1.0"),
/// );
/// assert_eq!(text, "This is your-package 1.0!");
/// ```
pub fn build_text(
    fragments: &[Fragment],
    substitutions: &[Substituter],
    placeholders: &Placeholders,
) -> String {
    let mut text: String = fragments.iter().map(Fragment::render).collect();

    for substituter in substitutions {
        text = substituter.substitute(&text);
    }

    for (token, value) in [
        (PACKAGE_NAME_PLACEHOLDER, &placeholders.package_name),
        (VERSION_PLACEHOLDER, &placeholders.version),
    ] {
        match value {
            Some(value) => text = text.replace(token, value),
            None if text.contains(token) => warn!("{} used but no value was supplied", token),
            None => {}
        }
    }

    debug!("Rendered {} bytes from {} fragment(s)", text.len(), fragments.len());
    text
}

/// Render a validated configuration.
pub fn build(config: Config, placeholders: &Placeholders) -> Readme {
    let text = build_text(&config.fragments, &config.substitutions, placeholders);
    Readme {
        content_type: config.content_type,
        text,
    }
}
