//! Result model
//!
//! One [`ScanResult`] per file with at least one match, collected into a
//! [`ScanReport`] together with run statistics and diagnostics.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::core::diagnostics::Diagnostics;

/// Match statistics for a single file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Path that produced the matches, as discovered
    pub file_name: String,

    /// Pattern used, echoed for traceability
    pub pattern: String,

    pub match_count: usize,

    pub unique_match_count: usize,

    /// Every match in order of occurrence
    pub matched_strings: Vec<String>,

    /// Distinct matches in first-seen order
    pub unique_matched_strings: Vec<String>,
}

impl ScanResult {
    /// Build a result from the matches found in one file.
    ///
    /// Returns None when there are no matches; zero-match files never
    /// produce a result.
    pub fn from_matches(
        file_name: impl Into<String>,
        pattern: impl Into<String>,
        matched_strings: Vec<String>,
    ) -> Option<Self> {
        if matched_strings.is_empty() {
            return None;
        }

        let mut seen = HashSet::new();
        let unique_matched_strings: Vec<String> = matched_strings
            .iter()
            .filter(|m| seen.insert(m.as_str()))
            .cloned()
            .collect();

        Some(Self {
            file_name: file_name.into(),
            pattern: pattern.into(),
            match_count: matched_strings.len(),
            unique_match_count: unique_matched_strings.len(),
            matched_strings,
            unique_matched_strings,
        })
    }
}

/// Counters for one pipeline run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// Files discovered by the walker, after de-duplication
    pub candidates: usize,
    pub pruned_directories: usize,
    /// Candidates removed by the extension filter
    pub extension_filtered: usize,
    pub binary_skipped: usize,
    /// Files whose content was read and searched
    pub files_inspected: usize,
    /// Files dropped after walking for any per-file error
    pub files_skipped: usize,
    pub files_matched: usize,
    pub total_matches: usize,
}

/// Everything a pipeline run hands back to its caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanReport {
    /// Results in file-processing order
    pub results: Vec<ScanResult>,
    pub stats: ScanStats,
    pub diagnostics: Diagnostics,
}

impl ScanReport {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Result for a file, matched on the trailing part of its path
    pub fn result_for(&self, suffix: &str) -> Option<&ScanResult> {
        self.results.iter().find(|r| r.file_name.ends_with(suffix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_from_matches_empty_is_none() {
        assert!(ScanResult::from_matches("a.txt", "cat", Vec::new()).is_none());
    }

    #[test]
    fn test_from_matches_counts() {
        let result = ScanResult::from_matches("a.txt", "cat", strings(&["cat", "cat"])).unwrap();
        assert_eq!(result.match_count, 2);
        assert_eq!(result.unique_match_count, 1);
        assert_eq!(result.matched_strings, strings(&["cat", "cat"]));
        assert_eq!(result.unique_matched_strings, strings(&["cat"]));
    }

    #[test]
    fn test_unique_preserves_first_seen_order() {
        let result = ScanResult::from_matches(
            "a.txt",
            "(wo)?m(a|e)n",
            strings(&["men", "woman", "Men", "men", "woman"]),
        )
        .unwrap();
        assert_eq!(result.unique_matched_strings, strings(&["men", "woman", "Men"]));
        assert_eq!(result.unique_match_count, 3);
    }

    #[test]
    fn test_serialized_field_names() {
        let result = ScanResult::from_matches("a.txt", "cat", strings(&["cat"])).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        for key in [
            "file_name",
            "pattern",
            "match_count",
            "unique_match_count",
            "matched_strings",
            "unique_matched_strings",
        ] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
    }

    #[test]
    fn test_report_result_for() {
        let report = ScanReport {
            results: vec![ScanResult::from_matches("r/sub/a.txt", "x", strings(&["x"])).unwrap()],
            ..Default::default()
        };
        assert!(report.result_for("a.txt").is_some());
        assert!(report.result_for("b.txt").is_none());
        assert!(!report.is_empty());
    }
}
