//! Dotted locations inside a raw configuration
//!
//! Every validation message starts with the location it refers to, written
//! the way users address keys in their TOML files:
//! `tool.hatch.metadata.hooks.fancy-pypi-readme.fragments.0.text`.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Key(String),
    Index(usize),
}

/// A location in the raw configuration, rendered as a dotted path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    /// The empty path. Displays as an empty string.
    pub fn root() -> Self {
        Self::default()
    }

    /// A path starting at `prefix`, which may itself contain dots.
    ///
    /// ```
    /// use fancy_readme::path::FieldPath;
    ///
    /// let path = FieldPath::with_prefix("tool.fancy-pypi-readme");
    /// assert_eq!(path.key("fragments").index(0).to_string(), "tool.fancy-pypi-readme.fragments.0");
    /// ```
    pub fn with_prefix(prefix: &str) -> Self {
        let mut path = Self::root();
        if !prefix.is_empty() {
            path.segments.push(Segment::Key(prefix.to_string()));
        }
        path
    }

    /// A copy of this path extended by a mapping key.
    pub fn key(&self, key: &str) -> Self {
        let mut path = self.clone();
        path.segments.push(Segment::Key(key.to_string()));
        path
    }

    /// A copy of this path extended by a sequence index.
    pub fn index(&self, index: usize) -> Self {
        let mut path = self.clone();
        path.segments.push(Segment::Index(index));
        path
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            match segment {
                Segment::Key(key) => f.write_str(key)?,
                Segment::Index(index) => write!(f, "{}", index)?,
            }
        }
        Ok(())
    }
}
