//! # Substitutions
//!
//! Regex find-and-replace rules applied to the assembled readme, in the order
//! they are configured, each against the output of the previous one.
//!
//! Replacement templates use backslash backreferences as written in
//! `pyproject.toml` files: `\1`, `\g<1>` and `\g<name>` refer to groups of the
//! pattern, the usual control escapes (`\\`, `\n`, `\t`, `\r`, `\a`, `\b`,
//! `\f`, `\v`) are honoured, and `$` is a literal dollar sign. Templates are
//! checked against their pattern when the rule is resolved, so a reference to
//! a group the pattern lacks is a configuration error rather than silently
//! empty output.

use crate::error::{ConfigurationError, ErrorCollector};
use crate::path::FieldPath;
use crate::schema;
use log::debug;
use regex::{Regex, RegexBuilder};
use serde_json::Value;
use std::borrow::Cow;
use thiserror::Error;

const PATTERN: &str = "pattern";
const REPLACEMENT: &str = "replacement";
const IGNORE_CASE: &str = "ignore-case";

const FIELDS: &[&str] = &[PATTERN, REPLACEMENT, IGNORE_CASE];

/// Why a substitution rule could not be compiled.
#[derive(Error, Debug)]
pub enum RuleError {
    #[error("invalid pattern: {}", schema::describe_regex_error(.0))]
    Pattern(#[from] regex::Error),

    #[error("invalid replacement: {0}")]
    Replacement(String),
}

/// A compiled find-and-replace rule.
#[derive(Debug, Clone)]
pub struct Substituter {
    pattern: Regex,
    replacement: String,
    /// `replacement` rewritten into the `regex` crate's `$` syntax.
    template: String,
    ignore_case: bool,
}

impl Substituter {
    /// Compile a rule from its parts.
    ///
    /// ```
    /// use fancy_readme::substitutions::Substituter;
    ///
    /// let sub = Substituter::new(r"#(\d+)", r"[#\1](https://example.com/issues/\1)", false).unwrap();
    /// assert_eq!(sub.substitute("Fixed #4."), "Fixed [#4](https://example.com/issues/4).");
    /// ```
    pub fn new(pattern: &str, replacement: &str, ignore_case: bool) -> Result<Self, RuleError> {
        let regex = compile(pattern, ignore_case)?;
        let template = translate_template(replacement, &regex).map_err(RuleError::Replacement)?;
        Ok(Self {
            pattern: regex,
            replacement: replacement.to_string(),
            template,
            ignore_case,
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    /// Replace every non-overlapping match of the pattern in `text`.
    pub fn substitute(&self, text: &str) -> String {
        match self.pattern.replace_all(text, self.template.as_str()) {
            Cow::Borrowed(unchanged) => {
                debug!("Substitution '{}' did not match", self.pattern.as_str());
                unchanged.to_string()
            }
            Cow::Owned(replaced) => replaced,
        }
    }
}

impl PartialEq for Substituter {
    fn eq(&self, other: &Self) -> bool {
        self.pattern.as_str() == other.pattern.as_str()
            && self.replacement == other.replacement
            && self.ignore_case == other.ignore_case
    }
}

impl Eq for Substituter {}

/// Resolve every entry of `entries`, located at `path`.
///
/// A failing entry does not stop the others; all messages are returned
/// together.
pub fn resolve_all(entries: &[Value], path: &FieldPath) -> Result<Vec<Substituter>, ConfigurationError> {
    let mut errors = ErrorCollector::new();
    let mut substituters = Vec::with_capacity(entries.len());

    for (i, entry) in entries.iter().enumerate() {
        if let Some(substituter) = errors.absorb(resolve(entry, &path.index(i))) {
            substituters.push(substituter);
        }
    }

    errors.finish(substituters)
}

/// Resolve one raw substitution entry located at `path`.
pub fn resolve(entry: &Value, path: &FieldPath) -> Result<Substituter, ConfigurationError> {
    let map = schema::as_object(entry, path)?;
    let mut errors = ErrorCollector::new();
    schema::check_fields(map, FIELDS, path, &mut errors);

    let pattern = schema::required_str(map, PATTERN, path, &mut errors);
    let replacement = schema::required_str(map, REPLACEMENT, path, &mut errors);
    let ignore_case = schema::optional_bool(map, IGNORE_CASE, path, &mut errors).unwrap_or(false);

    let regex = pattern.and_then(|p| match compile(p, ignore_case) {
        Ok(regex) => Some(regex),
        Err(e) => {
            errors.push(schema::invalid_regex(&path.key(PATTERN), p, &e));
            None
        }
    });

    let template = match (&regex, replacement) {
        (Some(regex), Some(replacement)) => match translate_template(replacement, regex) {
            Ok(template) => Some(template),
            Err(msg) => {
                errors.push(format!("{}: {}", path.key(REPLACEMENT), msg));
                None
            }
        },
        _ => None,
    };

    errors.finish_with(|| {
        Some(Substituter {
            pattern: regex?,
            replacement: replacement?.to_string(),
            template: template?,
            ignore_case,
        })
    })
}

fn compile(pattern: &str, ignore_case: bool) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .case_insensitive(ignore_case)
        .build()
}

/// Rewrite a backslash-style replacement template into `regex` syntax,
/// checking every group reference against `regex`.
fn translate_template(template: &str, regex: &Regex) -> Result<String, String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' {
            out.push_str("$$");
            continue;
        }
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        match chars.next() {
            None => return Err("bad escape (end of template).".to_string()),
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('a') => out.push('\x07'),
            Some('b') => out.push('\x08'),
            Some('f') => out.push('\x0c'),
            Some('v') => out.push('\x0b'),
            Some('g') => {
                if chars.next() != Some('<') {
                    return Err("missing '<' after \\g.".to_string());
                }
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('>') => break,
                        Some(c) => name.push(c),
                        None => return Err(format!("missing '>' in group reference \\g<{}.", name)),
                    }
                }
                check_group(&name, regex)?;
                out.push_str(&format!("${{{}}}", name));
            }
            Some(d @ '1'..='9') => {
                let mut number = d.to_string();
                if let Some(&next) = chars.peek() {
                    if next.is_ascii_digit() {
                        number.push(next);
                        chars.next();
                    }
                }
                check_group(&number, regex)?;
                out.push_str(&format!("${{{}}}", number));
            }
            Some(c) if c.is_ascii_alphabetic() => return Err(format!("bad escape \\{}.", c)),
            Some('$') => out.push_str("\\$$"),
            Some(c) => {
                out.push('\\');
                out.push(c);
            }
        }
    }

    Ok(out)
}

fn check_group(name: &str, regex: &Regex) -> Result<(), String> {
    if name.is_empty() {
        return Err("missing group name in \\g<>.".to_string());
    }
    if name.chars().all(|c| c.is_ascii_digit()) {
        let groups = regex.captures_len() - 1;
        return match name.parse::<usize>() {
            Ok(n) if n <= groups => Ok(()),
            _ => Err(format!(
                "invalid group reference {} (pattern has {} group(s)).",
                name, groups
            )),
        };
    }
    if regex.capture_names().flatten().any(|n| n == name) {
        Ok(())
    } else {
        Err(format!("unknown group name '{}'.", name))
    }
}
