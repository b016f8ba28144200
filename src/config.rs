//! Optional JSON configuration file
//!
//! Every field is optional. Values present in the file override the built-in
//! defaults; explicit command-line values are applied afterwards and win.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::file_reader::EncodingStrategy;
use crate::error::ConfigError;
use crate::scan::request::ScanParams;

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "WORDCRAWL_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub search_paths: Option<Vec<String>>,
    pub excluded_subdirectories: Option<Vec<String>>,
    pub included_extensions: Option<Vec<String>>,
    pub excluded_extensions: Option<Vec<String>>,
    pub include_binary_files: Option<bool>,
    pub collapse_whitespace: Option<bool>,
    pub encoding: Option<EncodingStrategy>,
    pub max_file_size: Option<u64>,
    pub follow_symlinks: Option<bool>,
    pub respect_ignore_files: Option<bool>,
    /// Output format name (json, jsonl, md)
    pub format: Option<String>,
}

impl FileConfig {
    /// Load a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.display().to_string(),
            source: e,
        })?;

        serde_json::from_str(&content).map_err(|e| ConfigError::ParseJson {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Overlay the values present in this file onto `params`
    pub fn apply_to(&self, params: &mut ScanParams) {
        if let Some(paths) = &self.search_paths {
            params.search_paths = paths.clone();
        }
        if let Some(names) = &self.excluded_subdirectories {
            params.excluded_subdirectories = names.clone();
        }
        if let Some(exts) = &self.included_extensions {
            params.included_extensions = exts.clone();
        }
        if let Some(exts) = &self.excluded_extensions {
            params.excluded_extensions = exts.clone();
        }
        if let Some(value) = self.include_binary_files {
            params.include_binary_files = value;
        }
        if let Some(value) = self.collapse_whitespace {
            params.collapse_whitespace = value;
        }
        if let Some(encoding) = self.encoding {
            params.encoding = encoding;
        }
        if let Some(limit) = self.max_file_size {
            params.max_file_size = Some(limit);
        }
        if let Some(value) = self.follow_symlinks {
            params.follow_symlinks = value;
        }
        if let Some(value) = self.respect_ignore_files {
            params.respect_ignore_files = value;
        }
    }
}
