//! Tokenizer and validator for `{{name}}` templates.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::variables::VariableRegistry;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{(\w+)\}\}").unwrap());

/// Why a template was rejected. The `Display` text is shown to users verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Template cannot be empty")]
    Empty,

    #[error("Unmatched braces in template")]
    UnmatchedBraces,

    /// Every unknown placeholder occurrence, in template order.
    #[error("Unknown variables: {}", .0.join(", "))]
    UnknownVariables(Vec<String>),
}

/// A piece of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Literal(&'a str),
    /// A placeholder; `name` excludes the braces, `raw` includes them.
    Placeholder { name: &'a str, raw: &'a str },
}

/// Split `template` into literal and placeholder segments, left to right.
///
/// Anything that is not exactly `{{` + word characters + `}}` stays literal, so stray
/// or malformed braces survive untouched.
pub fn parse(template: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;
    for caps in PLACEHOLDER.captures_iter(template) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            segments.push(Segment::Literal(&template[last..whole.start()]));
        }
        segments.push(Segment::Placeholder {
            name: name.as_str(),
            raw: whole.as_str(),
        });
        last = whole.end();
    }
    if last < template.len() {
        segments.push(Segment::Literal(&template[last..]));
    }
    segments
}

/// Names of all placeholders in `template`, in order, duplicates included.
pub fn placeholder_names(template: &str) -> Vec<&str> {
    parse(template)
        .into_iter()
        .filter_map(|s| match s {
            Segment::Placeholder { name, .. } => Some(name),
            Segment::Literal(_) => None,
        })
        .collect()
}

/// Check `template` against `registry`.
///
/// Rules, first failure wins: non-empty, equal counts of `{{` and `}}`, every
/// placeholder name registered.
pub fn validate(template: &str, registry: &VariableRegistry) -> Result<(), ValidationError> {
    if template.is_empty() {
        return Err(ValidationError::Empty);
    }

    if template.matches("{{").count() != template.matches("}}").count() {
        return Err(ValidationError::UnmatchedBraces);
    }

    let mut unknown: Vec<String> = Vec::new();
    for name in placeholder_names(template) {
        if !registry.contains(name) {
            unknown.push(name.to_string());
        }
    }
    if !unknown.is_empty() {
        return Err(ValidationError::UnknownVariables(unknown));
    }

    Ok(())
}
