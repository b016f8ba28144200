//! Common utilities

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Invalid WHITESPACE_RUN regex"));

/// Fold newlines and every run of whitespace into a single space.
///
/// Matching against the folded text lets a pattern like `foo bar` match
/// across a line break; it also means match boundaries and matched text can
/// differ from the raw file content.
pub fn collapse_whitespace(text: &str) -> String {
    let single_line = text.replace('\n', " ");
    WHITESPACE_RUN.replace_all(&single_line, " ").into_owned()
}

/// Fraction of inspected files that matched, or None when nothing was inspected
pub fn match_ratio(matched: usize, inspected: usize) -> Option<f64> {
    if inspected == 0 {
        return None;
    }
    Some(matched as f64 / inspected as f64)
}

/// Human-readable run summary
pub fn summary_line(matched: usize, inspected: usize) -> String {
    match match_ratio(matched, inspected) {
        Some(ratio) => format!(
            "{} of {} inspected files matched ({:.1}%)",
            matched,
            inspected,
            ratio * 100.0
        ),
        None => "no files inspected".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace_joins_lines() {
        assert_eq!(collapse_whitespace("foo\n\n  bar"), "foo bar");
    }

    #[test]
    fn test_collapse_whitespace_tabs_and_crlf() {
        assert_eq!(collapse_whitespace("a\t\tb\r\nc"), "a b c");
    }

    #[test]
    fn test_collapse_whitespace_keeps_edges_as_single_space() {
        assert_eq!(collapse_whitespace("\n  x  \n"), " x ");
    }

    #[test]
    fn test_collapse_whitespace_no_op() {
        assert_eq!(collapse_whitespace("plain"), "plain");
    }

    #[test]
    fn test_match_ratio_guards_zero() {
        assert_eq!(match_ratio(0, 0), None);
        assert_eq!(match_ratio(1, 4), Some(0.25));
    }

    #[test]
    fn test_summary_line() {
        assert_eq!(summary_line(0, 0), "no files inspected");
        assert_eq!(summary_line(1, 4), "1 of 4 inspected files matched (25.0%)");
    }
}
