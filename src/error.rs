//! Error types
//!
//! Construction-time failures are fatal and surface as [`ScanError`]. Per-file
//! problems never become errors; they are reported as diagnostics instead.

use std::path::PathBuf;

/// Fatal errors raised while validating scan parameters.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("The pattern is empty")]
    EmptyPattern,

    #[error("The value [{pattern}] cannot be compiled as a regex: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("'{}' is not a directory or a file. Remove it from the search paths and try again", path.display())]
    PathNotFound { path: PathBuf },

    #[error(
        "Both included and excluded extensions were supplied; only one may be used. \
         Included: {included:?}, excluded: {excluded:?}"
    )]
    ConflictingFilter {
        included: Vec<String>,
        excluded: Vec<String>,
    },

    #[error("Excluded subdirectory '{name}' must be a plain name without path separators")]
    InvalidExcludedName { name: String },
}

/// Configuration loading error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON config {path}: {source}")]
    ParseJson {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
