//! Parameter normalization
//!
//! [`ScanParams`] is what a caller fills in; [`ScanRequest`] is the validated,
//! immutable form the pipeline runs on. Validation touches the filesystem only
//! to check that search paths exist.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::core::file_reader::{EncodingStrategy, FileReadConfig};
use crate::core::paths::expand_home;
use crate::error::ScanError;
use crate::scan::extensions::ExtensionPolicy;
use crate::scan::pattern::RegexMatcher;

/// Subdirectories pruned when the caller does not say otherwise
pub const DEFAULT_EXCLUDED_SUBDIRECTORIES: &[&str] = &[".git", ".idea"];

/// Raw scan parameters, before validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanParams {
    pub pattern: String,

    /// Files or directories to search; empty means the current directory
    pub search_paths: Vec<String>,

    /// Directory basenames never descended into
    pub excluded_subdirectories: Vec<String>,

    pub included_extensions: Vec<String>,

    pub excluded_extensions: Vec<String>,

    pub include_binary_files: bool,

    /// Fold newlines and whitespace runs to single spaces before matching
    pub collapse_whitespace: bool,

    pub encoding: EncodingStrategy,

    pub max_file_size: Option<u64>,

    pub follow_symlinks: bool,

    /// Also honor .gitignore / .ignore files while walking
    pub respect_ignore_files: bool,
}

impl Default for ScanParams {
    fn default() -> Self {
        Self {
            pattern: String::new(),
            search_paths: Vec::new(),
            excluded_subdirectories: DEFAULT_EXCLUDED_SUBDIRECTORIES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            included_extensions: Vec::new(),
            excluded_extensions: Vec::new(),
            include_binary_files: false,
            collapse_whitespace: false,
            encoding: EncodingStrategy::default(),
            max_file_size: None,
            follow_symlinks: false,
            respect_ignore_files: false,
        }
    }
}

impl ScanParams {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ..Default::default()
        }
    }

    pub fn with_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Validate into a [`ScanRequest`]
    pub fn validate(self) -> Result<ScanRequest, ScanError> {
        ScanRequest::new(self)
    }
}

/// Traversal options carried by a request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkOptions {
    pub follow_symlinks: bool,
    pub respect_ignore_files: bool,
}

/// A validated scan request
#[derive(Debug, Clone)]
pub struct ScanRequest {
    pattern: String,
    matcher: RegexMatcher,
    search_paths: Vec<PathBuf>,
    excluded_subdirectories: BTreeSet<String>,
    extensions: ExtensionPolicy,
    include_binary_files: bool,
    collapse_whitespace: bool,
    case_insensitive: bool,
    read_config: FileReadConfig,
    walk_options: WalkOptions,
}

impl ScanRequest {
    pub fn new(params: ScanParams) -> Result<Self, ScanError> {
        let pattern = params.pattern;
        if pattern.is_empty() {
            return Err(ScanError::EmptyPattern);
        }
        let matcher =
            RegexMatcher::compile(&pattern).map_err(|source| ScanError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;

        let search_paths = normalize_search_paths(&params.search_paths)?;
        let excluded_subdirectories = normalize_excluded_names(&params.excluded_subdirectories)?;
        let extensions =
            ExtensionPolicy::from_lists(&params.included_extensions, &params.excluded_extensions)?;

        Ok(Self {
            pattern,
            matcher,
            search_paths,
            excluded_subdirectories,
            extensions,
            include_binary_files: params.include_binary_files,
            collapse_whitespace: params.collapse_whitespace,
            case_insensitive: true,
            read_config: FileReadConfig {
                encoding: params.encoding,
                max_file_size: params.max_file_size,
            },
            walk_options: WalkOptions {
                follow_symlinks: params.follow_symlinks,
                respect_ignore_files: params.respect_ignore_files,
            },
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn matcher(&self) -> &RegexMatcher {
        &self.matcher
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    pub fn excluded_subdirectories(&self) -> &BTreeSet<String> {
        &self.excluded_subdirectories
    }

    pub fn extensions(&self) -> &ExtensionPolicy {
        &self.extensions
    }

    pub fn include_binary_files(&self) -> bool {
        self.include_binary_files
    }

    pub fn collapse_whitespace(&self) -> bool {
        self.collapse_whitespace
    }

    pub fn case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    pub fn read_config(&self) -> &FileReadConfig {
        &self.read_config
    }

    pub fn walk_options(&self) -> WalkOptions {
        self.walk_options
    }
}

fn normalize_search_paths(raw: &[String]) -> Result<Vec<PathBuf>, ScanError> {
    if raw.is_empty() {
        return Ok(vec![PathBuf::from(".")]);
    }

    raw.iter()
        .map(|entry| {
            let path = expand_home(entry);
            if path.is_file() || path.is_dir() {
                Ok(path)
            } else {
                Err(ScanError::PathNotFound { path })
            }
        })
        .collect()
}

fn normalize_excluded_names(raw: &[String]) -> Result<BTreeSet<String>, ScanError> {
    let mut names = BTreeSet::new();
    for entry in raw {
        let name = entry.trim().trim_end_matches(['/', '\\']);
        if name.is_empty() {
            continue;
        }
        if name.contains(['/', '\\']) {
            return Err(ScanError::InvalidExcludedName {
                name: entry.clone(),
            });
        }
        names.insert(name.to_string());
    }
    Ok(names)
}
