/*
 * names.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Name casing variants for a new step type.
 */

use crate::types::CreateError;

/// The validated name and extension of a step type, plus the casing
/// variants that stand in for `template` and `Template` in the template set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameSet {
    raw_name: String,
    raw_extension: String,
    lower_first: String,
    upper_first: String,
}

impl NameSet {
    /// Validate `name` and `extension` and derive the casing variants.
    ///
    /// Both must be non-empty and contain only ASCII letters, digits and
    /// underscores. The name is checked first.
    pub fn new(name: &str, extension: &str) -> Result<Self, CreateError> {
        if !is_valid_identifier(name) {
            return Err(CreateError::InvalidName(name.to_string()));
        }
        if !is_valid_identifier(extension) {
            return Err(CreateError::InvalidExtension(extension.to_string()));
        }

        Ok(Self {
            raw_name: name.to_string(),
            raw_extension: extension.to_string(),
            lower_first: map_first_char(name, char::to_lowercase),
            upper_first: map_first_char(name, char::to_uppercase),
        })
    }

    /// The name exactly as given.
    pub fn raw_name(&self) -> &str {
        &self.raw_name
    }

    /// The file extension, without a leading dot.
    pub fn extension(&self) -> &str {
        &self.raw_extension
    }

    /// The name with a lower-case first character (e.g. `quiz`).
    pub fn lower_first(&self) -> &str {
        &self.lower_first
    }

    /// The name with an upper-case first character (e.g. `Quiz`).
    pub fn upper_first(&self) -> &str {
        &self.upper_first
    }

    /// The `nodeName` registered in the manifest (e.g. `QuizNode`).
    pub fn node_name(&self) -> String {
        format!("{}Node", self.upper_first)
    }
}

fn is_valid_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn map_first_char<I>(s: &str, f: impl Fn(char) -> I) -> String
where
    I: Iterator<Item = char>,
{
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => f(first).chain(chars).collect(),
        None => String::new(),
    }
}
