//! # Fragments
//!
//! A fragment is one ordered unit of source text contributing to the rendered
//! readme. The kind of a raw fragment entry is decided by its distinguishing
//! key:
//!
//! - `text`: a literal, non-empty string.
//! - `path`: the contents of a file, optionally cut down with `start-after`,
//!   `start-at`, `end-before` and `pattern`.
//!
//! File fragments are read and sliced once, while they are resolved. Rendering
//! a fragment never touches the filesystem.

use crate::error::{ConfigurationError, ErrorCollector};
use crate::path::FieldPath;
use crate::schema;
use log::debug;
use regex::RegexBuilder;
use serde_json::{Map, Value};
use std::io;
use std::path::{Path, PathBuf};

const TEXT_KEY: &str = "text";
const PATH_KEY: &str = "path";
const START_AFTER: &str = "start-after";
const START_AT: &str = "start-at";
const END_BEFORE: &str = "end-before";
const PATTERN: &str = "pattern";

const FILE_FIELDS: &[&str] = &[PATH_KEY, START_AFTER, START_AT, END_BEFORE, PATTERN];

/// A resolved fragment, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Text(TextFragment),
    File(FileFragment),
}

impl Fragment {
    /// A literal text fragment.
    pub fn text(text: impl Into<String>) -> Self {
        Fragment::Text(TextFragment { text: text.into() })
    }

    /// The text this fragment contributes to the readme.
    pub fn render(&self) -> &str {
        match self {
            Fragment::Text(fragment) => &fragment.text,
            Fragment::File(fragment) => &fragment.contents,
        }
    }
}

/// A static text fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFragment {
    text: String,
}

/// A fragment whose text was extracted from a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFragment {
    path: PathBuf,
    contents: String,
}

impl FileFragment {
    /// The path as written in the configuration.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Which fragment an entry declares, decided once by its distinguishing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FragmentKind {
    Text,
    File,
}

impl FragmentKind {
    fn detect(entry: &Map<String, Value>) -> Option<Self> {
        if entry.contains_key(TEXT_KEY) {
            Some(FragmentKind::Text)
        } else if entry.contains_key(PATH_KEY) {
            Some(FragmentKind::File)
        } else {
            None
        }
    }
}

/// Where a file fragment starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Start<'a> {
    /// Drop the needle and everything before it.
    After(&'a str),
    /// Drop everything before the needle, keep the needle.
    At(&'a str),
}

/// The extraction directives of one file fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Directives<'a> {
    start: Option<Start<'a>>,
    end_before: Option<&'a str>,
    pattern: Option<&'a str>,
}

/// Resolve every entry of `entries`, located at `path`.
///
/// A failing entry does not stop the others; the messages of every failing
/// entry are returned together, each located by index
/// (`<path>.2.text`, ...). Relative file paths resolve against `root`.
pub fn resolve_all(
    entries: &[Value],
    path: &FieldPath,
    root: &Path,
) -> Result<Vec<Fragment>, ConfigurationError> {
    let mut errors = ErrorCollector::new();
    let mut fragments = Vec::with_capacity(entries.len());

    for (i, entry) in entries.iter().enumerate() {
        if let Some(fragment) = errors.absorb(resolve(entry, &path.index(i), root)) {
            fragments.push(fragment);
        }
    }

    errors.finish(fragments)
}

/// Resolve one raw fragment entry located at `path`.
pub fn resolve(entry: &Value, path: &FieldPath, root: &Path) -> Result<Fragment, ConfigurationError> {
    let map = schema::as_object(entry, path)?;

    match FragmentKind::detect(map) {
        Some(FragmentKind::Text) => resolve_text(map, path),
        Some(FragmentKind::File) => resolve_file(map, path, root),
        None => Err(ConfigurationError::single(format!(
            "{}: unknown fragment type {}.",
            path, entry
        ))),
    }
}

fn resolve_text(map: &Map<String, Value>, path: &FieldPath) -> Result<Fragment, ConfigurationError> {
    let mut errors = ErrorCollector::new();
    schema::check_fields(map, &[TEXT_KEY], path, &mut errors);

    let text = schema::required_str(map, TEXT_KEY, path, &mut errors);
    if text == Some("") {
        errors.push(schema::must_not_be_empty(&path.key(TEXT_KEY)));
    }

    errors.finish_with(|| text.map(Fragment::text))
}

fn resolve_file(
    map: &Map<String, Value>,
    path: &FieldPath,
    root: &Path,
) -> Result<Fragment, ConfigurationError> {
    let mut errors = ErrorCollector::new();
    schema::check_fields(map, FILE_FIELDS, path, &mut errors);

    let file = schema::required_str(map, PATH_KEY, path, &mut errors);
    let start_after = schema::optional_str(map, START_AFTER, path, &mut errors);
    let start_at = schema::optional_str(map, START_AT, path, &mut errors);
    let end_before = schema::optional_str(map, END_BEFORE, path, &mut errors);
    let pattern = schema::optional_str(map, PATTERN, path, &mut errors);

    if file == Some("") {
        errors.push(schema::must_not_be_empty(&path.key(PATH_KEY)));
    }
    let Some(file) = file.filter(|_| errors.is_empty()) else {
        return errors.finish_with(|| None);
    };

    let contents = read_fragment_file(root, file, path)?;

    let start = match (start_after, start_at) {
        (Some(_), Some(_)) => {
            return Err(ConfigurationError::single(format!(
                "{}: '{}' and '{}' are mutually exclusive.",
                path, START_AFTER, START_AT
            )));
        }
        (Some(needle), None) => Some(Start::After(needle)),
        (None, Some(needle)) => Some(Start::At(needle)),
        (None, None) => None,
    };
    let directives = Directives {
        start,
        end_before,
        pattern,
    };

    let contents = extract(&contents, &directives, path)?;
    debug!(
        "Resolved file fragment {} ({} bytes)",
        file,
        contents.len()
    );

    Ok(Fragment::File(FileFragment {
        path: PathBuf::from(file),
        contents,
    }))
}

fn read_fragment_file(root: &Path, file: &str, path: &FieldPath) -> Result<String, ConfigurationError> {
    let full_path = root.join(file);
    std::fs::read_to_string(&full_path).map_err(|e| {
        let location = path.key(PATH_KEY);
        if e.kind() == io::ErrorKind::NotFound {
            ConfigurationError::single(format!("{}: fragment file '{}' not found.", location, file))
        } else {
            ConfigurationError::single(format!(
                "{}: fragment file '{}' could not be read: {}",
                location, file, e
            ))
        }
    })
}

/// Apply the start boundary, then the end boundary, then the pattern, each
/// to the output of the previous step.
///
/// Every directive that fails records its own message; a boundary that is not
/// found leaves the text unchanged for the following steps.
fn extract(contents: &str, directives: &Directives<'_>, path: &FieldPath) -> Result<String, ConfigurationError> {
    let mut errors = ErrorCollector::new();
    let mut text = contents;

    match directives.start {
        Some(Start::After(needle)) => match text.split_once(needle) {
            Some((_, rest)) => text = rest,
            None => errors.push(not_found(path, START_AFTER, needle)),
        },
        Some(Start::At(needle)) => match text.find(needle) {
            Some(pos) => text = &text[pos..],
            None => errors.push(not_found(path, START_AT, needle)),
        },
        None => {}
    }

    if let Some(needle) = directives.end_before {
        match text.split_once(needle) {
            Some((head, _)) => text = head,
            None => errors.push(not_found(path, END_BEFORE, needle)),
        }
    }

    let mut extracted = None;
    if let Some(pattern) = directives.pattern {
        let location = path.key(PATTERN);
        match RegexBuilder::new(pattern).dot_matches_new_line(true).build() {
            Err(e) => errors.push(schema::invalid_regex(&location, pattern, &e)),
            Ok(regex) => match regex.captures(text) {
                None => errors.push(format!("{}: pattern '{}' not found.", location, pattern)),
                Some(_) if regex.captures_len() < 2 => errors.push(format!(
                    "{}: pattern matches, but no group defined.",
                    location
                )),
                Some(caps) => {
                    extracted = Some(caps.get(1).map_or("", |m| m.as_str()));
                }
            },
        }
    }

    errors.finish(extracted.unwrap_or(text).to_string())
}

fn not_found(path: &FieldPath, directive: &str, needle: &str) -> String {
    format!("{}: '{}' not found.", path.key(directive), needle)
}
