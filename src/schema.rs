//! # Schema Checks
//!
//! Hand-written shape checks over the raw configuration. Each helper looks at
//! one value, and on failure records a message in the shared phrasing used
//! across the crate:
//!
//! - `<path>.<key> is missing.`
//! - `<path> must not be empty.`
//! - `<path>.<key>: extra field not permitted.`
//! - `<path> is of wrong type: <value> is not of type '<type>'`
//! - `<path>: '<pattern>' is not a valid regular expression: <diagnostic>`
//!
//! Values are rendered as JSON in messages, so `42`, `"x"` and `[]` read the
//! same whatever file format the configuration came from.

use crate::error::{ConfigurationError, ErrorCollector};
use crate::path::FieldPath;
use serde_json::{Map, Value};

/// `<path>.<key> is missing.`
pub fn missing(path: &FieldPath, key: &str) -> String {
    format!("{} is missing.", path.key(key))
}

/// `<path> must not be empty.`
pub fn must_not_be_empty(path: &FieldPath) -> String {
    format!("{} must not be empty.", path)
}

/// `<path>.<key>: extra field not permitted.`
pub fn extra_field(path: &FieldPath, key: &str) -> String {
    format!("{}: extra field not permitted.", path.key(key))
}

/// `<path> is of wrong type: <value> is not of type '<expected>'`
pub fn wrong_type(path: &FieldPath, value: &Value, expected: &str) -> String {
    format!(
        "{} is of wrong type: {} is not of type '{}'",
        path, value, expected
    )
}

/// `<path>: '<pattern>' is not a valid regular expression: <diagnostic>`
pub fn invalid_regex(path: &FieldPath, pattern: &str, err: &regex::Error) -> String {
    format!(
        "{}: '{}' is not a valid regular expression: {}",
        path,
        pattern,
        describe_regex_error(err)
    )
}

/// Reduce a regex compiler error to its one-line diagnostic.
///
/// Syntax errors render as a multi-line block that repeats the pattern and
/// points at the offending position; only the final `error: ...` line is kept.
pub fn describe_regex_error(err: &regex::Error) -> String {
    match err {
        regex::Error::Syntax(msg) => msg
            .lines()
            .rev()
            .find_map(|line| line.trim().strip_prefix("error: "))
            .unwrap_or(msg.trim())
            .to_string(),
        other => other.to_string(),
    }
}

pub fn as_object<'a>(
    value: &'a Value,
    path: &FieldPath,
) -> Result<&'a Map<String, Value>, ConfigurationError> {
    value
        .as_object()
        .ok_or_else(|| ConfigurationError::single(wrong_type(path, value, "object")))
}

pub fn as_array<'a>(value: &'a Value, path: &FieldPath) -> Result<&'a [Value], ConfigurationError> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| ConfigurationError::single(wrong_type(path, value, "array")))
}

/// Record an error for every key of `map` not listed in `allowed`.
pub fn check_fields(
    map: &Map<String, Value>,
    allowed: &[&str],
    path: &FieldPath,
    errors: &mut ErrorCollector,
) {
    for key in map.keys() {
        if !allowed.contains(&key.as_str()) {
            errors.push(extra_field(path, key));
        }
    }
}

/// A string value at `key`, if present. Non-strings are recorded as errors.
pub fn optional_str<'a>(
    map: &'a Map<String, Value>,
    key: &str,
    path: &FieldPath,
    errors: &mut ErrorCollector,
) -> Option<&'a str> {
    let value = map.get(key)?;
    match value.as_str() {
        Some(s) => Some(s),
        None => {
            errors.push(wrong_type(&path.key(key), value, "string"));
            None
        }
    }
}

/// A string value at `key`. Absence and non-strings are recorded as errors.
pub fn required_str<'a>(
    map: &'a Map<String, Value>,
    key: &str,
    path: &FieldPath,
    errors: &mut ErrorCollector,
) -> Option<&'a str> {
    if !map.contains_key(key) {
        errors.push(missing(path, key));
        return None;
    }
    optional_str(map, key, path, errors)
}

/// A boolean value at `key`, if present. Non-booleans are recorded as errors.
pub fn optional_bool(
    map: &Map<String, Value>,
    key: &str,
    path: &FieldPath,
    errors: &mut ErrorCollector,
) -> Option<bool> {
    let value = map.get(key)?;
    match value.as_bool() {
        Some(b) => Some(b),
        None => {
            errors.push(wrong_type(&path.key(key), value, "boolean"));
            None
        }
    }
}
