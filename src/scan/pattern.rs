//! Pattern matching capability
//!
//! The pipeline only needs "find every match in this text"; [`RegexMatcher`]
//! provides that with the `regex` crate, always case-insensitive.

use regex::{Regex, RegexBuilder};

/// Finds all non-overlapping matches of a compiled pattern
pub trait PatternMatcher: Send + Sync {
    /// Matched substrings, left to right
    fn find_all(&self, text: &str) -> Vec<String>;

    /// The source pattern
    fn as_str(&self) -> &str;
}

/// Case-insensitive regex matcher
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    regex: Regex,
}

impl RegexMatcher {
    pub fn compile(pattern: &str) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self { regex })
    }
}

impl PatternMatcher for RegexMatcher {
    fn find_all(&self, text: &str) -> Vec<String> {
        // Zero-length matches (from patterns like `x*`) are not occurrences.
        self.regex
            .find_iter(text)
            .filter(|m| !m.as_str().is_empty())
            .map(|m| m.as_str().to_string())
            .collect()
    }

    fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}
