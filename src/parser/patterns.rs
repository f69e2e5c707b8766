//! Lexical pattern vocabulary for paragraph classification.
//!
//! Compiled once per parse and passed by reference; all predicates are pure
//! functions over the raw paragraph text.

use crate::Result;
use regex::Regex;

/// Lowercase-and-trim normalization applied before every keyword comparison.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Remove a leading numeric prefix ("2.", "3.1", "4.1.2") plus the
/// whitespace after it. Text without such a prefix comes back trimmed only.
pub fn strip_numeric_prefix(text: &str) -> &str {
    let trimmed = text.trim();
    let rest = trimmed.trim_start_matches(|c: char| c.is_ascii_digit() || c == '.');
    if rest.len() == trimmed.len() {
        trimmed
    } else {
        rest.trim_start()
    }
}

/// Compiled numbering and role patterns shared by every classifier step.
#[derive(Debug)]
pub struct Patterns {
    single_level: Regex,
    two_level: Regex,
    three_level: Regex,
    designee: Regex,
}

impl Patterns {
    pub fn new() -> Result<Self> {
        Ok(Self {
            single_level: Regex::new(r"^(\d+)\.\s+")?,
            two_level: Regex::new(r"^\s*\d+\.\d+")?,
            three_level: Regex::new(r"^\s*\d+\.\d+\.\d+")?,
            designee: Regex::new(r"(?i)^process\s+designee")?,
        })
    }

    /// "7. Revisions" style heading: one numeric level, not "7.1".
    pub fn is_single_level(&self, raw: &str) -> bool {
        self.single_level.is_match(raw) && !self.two_level.is_match(raw)
    }

    /// Subclause numbering "x.y".
    pub fn is_two_level(&self, raw: &str) -> bool {
        self.two_level.is_match(raw)
    }

    /// Sub-subclause numbering "x.y.z".
    pub fn is_three_level(&self, raw: &str) -> bool {
        self.three_level.is_match(raw)
    }

    /// Lines opening a designee block ("Process Designee(s) ...").
    pub fn is_designee(&self, text: &str) -> bool {
        self.designee.is_match(text)
    }
}
