//! Matcher and aggregator
//!
//! Reads each surviving candidate, optionally collapses whitespace, runs the
//! pattern over the whole content and turns the matches into a
//! [`ScanResult`]. Files with no matches produce no result.
//!
//! With the `parallel` feature files are searched on the rayon pool; results
//! and diagnostics are still recorded in candidate order.

use std::path::{Path, PathBuf};

use crate::core::diagnostics::{Diagnostic, DiagnosticCode, Diagnostics};
use crate::core::file_reader::{read_text, FileRead, FileReadConfig};
use crate::core::model::{ScanResult, ScanStats};
use crate::core::paths::normalize_path;
use crate::core::util::collapse_whitespace;
use crate::scan::pattern::PatternMatcher;

/// Per-file search settings
#[derive(Clone, Copy)]
pub struct SearchOptions<'a> {
    pub matcher: &'a dyn PatternMatcher,
    /// Pattern text echoed into every result
    pub pattern: &'a str,
    pub collapse_whitespace: bool,
    pub read_config: &'a FileReadConfig,
}

/// What happened to one file
#[derive(Debug)]
pub enum FileOutcome {
    Matched(ScanResult),
    NoMatches,
    Skipped,
}

/// Outcome of searching one file, with the diagnostics it raised
#[derive(Debug)]
pub struct FileSearch {
    pub outcome: FileOutcome,
    pub diagnostics: Vec<Diagnostic>,
}

/// Search a single file
pub fn search_file(path: &Path, options: &SearchOptions<'_>) -> FileSearch {
    let mut diagnostics = Vec::new();

    let content = match read_text(path, options.read_config) {
        FileRead::Text { content, note } => {
            diagnostics.extend(note);
            content
        }
        FileRead::Skipped(diagnostic) => {
            diagnostics.push(diagnostic);
            return FileSearch {
                outcome: FileOutcome::Skipped,
                diagnostics,
            };
        }
    };

    let haystack = if options.collapse_whitespace {
        collapse_whitespace(&content)
    } else {
        content
    };

    let matches = options.matcher.find_all(&haystack);
    let outcome = match ScanResult::from_matches(normalize_path(path), options.pattern, matches) {
        Some(result) => FileOutcome::Matched(result),
        None => {
            diagnostics.push(
                Diagnostic::new(DiagnosticCode::NoMatches, "Searched; no matches").with_path(path),
            );
            FileOutcome::NoMatches
        }
    };

    FileSearch {
        outcome,
        diagnostics,
    }
}

/// Search every candidate and aggregate the results in candidate order
pub fn search_files(
    candidates: &[PathBuf],
    options: &SearchOptions<'_>,
    diagnostics: &mut Diagnostics,
    stats: &mut ScanStats,
) -> Vec<ScanResult> {
    let searches = run_searches(candidates, options);

    let mut results = Vec::new();
    for search in searches {
        for diagnostic in search.diagnostics {
            diagnostics.emit(diagnostic);
        }
        match search.outcome {
            FileOutcome::Matched(result) => {
                stats.files_inspected += 1;
                stats.files_matched += 1;
                stats.total_matches += result.match_count;
                results.push(result);
            }
            FileOutcome::NoMatches => stats.files_inspected += 1,
            FileOutcome::Skipped => stats.files_skipped += 1,
        }
    }
    results
}

#[cfg(not(feature = "parallel"))]
fn run_searches(candidates: &[PathBuf], options: &SearchOptions<'_>) -> Vec<FileSearch> {
    candidates
        .iter()
        .map(|path| search_file(path, options))
        .collect()
}

#[cfg(feature = "parallel")]
fn run_searches(candidates: &[PathBuf], options: &SearchOptions<'_>) -> Vec<FileSearch> {
    use rayon::prelude::*;

    // Indexed collect keeps candidate order.
    candidates
        .par_iter()
        .map(|path| search_file(path, options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::file_reader::EncodingStrategy;
    use crate::scan::pattern::RegexMatcher;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn options<'a>(
        matcher: &'a RegexMatcher,
        pattern: &'a str,
        collapse: bool,
        read_config: &'a FileReadConfig,
    ) -> SearchOptions<'a> {
        SearchOptions {
            matcher,
            pattern,
            collapse_whitespace: collapse,
            read_config,
        }
    }

    #[test]
    fn test_search_file_matches() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "a.txt", b"Cat dog\ncat");
        let matcher = RegexMatcher::compile("cat").unwrap();
        let config = FileReadConfig::default();

        let search = search_file(&path, &options(&matcher, "cat", false, &config));

        match search.outcome {
            FileOutcome::Matched(result) => {
                assert_eq!(result.match_count, 2);
                assert_eq!(result.unique_match_count, 2);
                assert_eq!(result.matched_strings, vec!["Cat", "cat"]);
                assert_eq!(result.pattern, "cat");
                assert_eq!(result.file_name, normalize_path(&path));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(search.diagnostics.is_empty());
    }

    #[test]
    fn test_search_file_no_matches() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "a.txt", b"dog");
        let matcher = RegexMatcher::compile("cat").unwrap();
        let config = FileReadConfig::default();

        let search = search_file(&path, &options(&matcher, "cat", false, &config));

        assert!(matches!(search.outcome, FileOutcome::NoMatches));
        assert_eq!(search.diagnostics[0].code, DiagnosticCode::NoMatches);
    }

    #[test]
    fn test_collapse_joins_lines() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "a.txt", b"foo\n\n  bar");
        let matcher = RegexMatcher::compile("foo bar").unwrap();
        let config = FileReadConfig::default();

        let plain = search_file(&path, &options(&matcher, "foo bar", false, &config));
        assert!(matches!(plain.outcome, FileOutcome::NoMatches));

        let collapsed = search_file(&path, &options(&matcher, "foo bar", true, &config));
        match collapsed.outcome {
            FileOutcome::Matched(result) => assert_eq!(result.matched_strings, vec!["foo bar"]),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_undecodable_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "a.txt", b"cat \xff\xfe cat");
        let matcher = RegexMatcher::compile("cat").unwrap();
        let config = FileReadConfig::default();

        let search = search_file(&path, &options(&matcher, "cat", false, &config));

        assert!(matches!(search.outcome, FileOutcome::Skipped));
        assert_eq!(search.diagnostics[0].code, DiagnosticCode::DecodeFailed);
    }

    #[test]
    fn test_lossy_decoding_still_matches() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "a.txt", b"cat \xff cat");
        let matcher = RegexMatcher::compile("cat").unwrap();
        let config = FileReadConfig {
            encoding: EncodingStrategy::Utf8Lossy,
            ..Default::default()
        };

        let search = search_file(&path, &options(&matcher, "cat", false, &config));

        assert!(matches!(search.outcome, FileOutcome::Matched(_)));
        assert_eq!(search.diagnostics[0].code, DiagnosticCode::LossyConversion);
    }

    #[test]
    fn test_search_files_aggregates_in_order() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.txt", b"cat cat");
        let b = write(&dir, "b.txt", b"dog");
        let c = write(&dir, "c.txt", b"CAT");
        let gone = dir.path().join("gone.txt");
        let matcher = RegexMatcher::compile("cat").unwrap();
        let config = FileReadConfig::default();
        let mut diags = Diagnostics::new();
        let mut stats = ScanStats::default();

        let results = search_files(
            &[c.clone(), gone, b, a.clone()],
            &options(&matcher, "cat", false, &config),
            &mut diags,
            &mut stats,
        );

        let names: Vec<_> = results.iter().map(|r| r.file_name.clone()).collect();
        assert_eq!(names, vec![normalize_path(&c), normalize_path(&a)]);
        assert_eq!(stats.files_inspected, 3);
        assert_eq!(stats.files_matched, 2);
        assert_eq!(stats.files_skipped, 1);
        assert_eq!(stats.total_matches, 3);
        assert_eq!(diags.paths_with(DiagnosticCode::FileVanished).len(), 1);
        assert_eq!(diags.paths_with(DiagnosticCode::NoMatches).len(), 1);
    }
}
