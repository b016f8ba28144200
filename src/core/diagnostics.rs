//! Diagnostics sink
//!
//! Everything the pipeline has to say about files it pruned, skipped or could
//! not read goes here, never into the result list. Each diagnostic is stored
//! for the caller and logged through `tracing` as it is emitted.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::paths::normalize_path;

/// Diagnostic codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticCode {
    /// A subdirectory matched an excluded name and was not descended into
    DirectoryPruned,
    /// A symlink was not followed (symlinked directory or dangling link)
    SymlinkSkipped,
    /// The walker could not read an entry
    WalkError,
    /// The classifier judged the file to be binary
    BinaryFileSkipped,
    /// The file disappeared between enumeration and use
    FileVanished,
    /// The classifier failed for a reason other than a missing file
    ClassifierFailed,
    /// Content is not valid text under the configured encoding
    DecodeFailed,
    /// Content was decoded with replacement characters
    LossyConversion,
    /// The file exceeds the configured size limit
    FileTooLarge,
    /// Any other read error
    ReadFailed,
    /// The file was searched but nothing matched
    NoMatches,
    /// Matched/inspected summary for the run
    Summary,
}

impl DiagnosticCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::DirectoryPruned => "DIRECTORY_PRUNED",
            DiagnosticCode::SymlinkSkipped => "SYMLINK_SKIPPED",
            DiagnosticCode::WalkError => "WALK_ERROR",
            DiagnosticCode::BinaryFileSkipped => "BINARY_FILE_SKIPPED",
            DiagnosticCode::FileVanished => "FILE_VANISHED",
            DiagnosticCode::ClassifierFailed => "CLASSIFIER_FAILED",
            DiagnosticCode::DecodeFailed => "DECODE_FAILED",
            DiagnosticCode::LossyConversion => "LOSSY_CONVERSION",
            DiagnosticCode::FileTooLarge => "FILE_TOO_LARGE",
            DiagnosticCode::ReadFailed => "READ_FAILED",
            DiagnosticCode::NoMatches => "NO_MATCHES",
            DiagnosticCode::Summary => "SUMMARY",
        }
    }

    fn level(&self) -> Level {
        match self {
            DiagnosticCode::WalkError
            | DiagnosticCode::FileVanished
            | DiagnosticCode::ClassifierFailed
            | DiagnosticCode::DecodeFailed
            | DiagnosticCode::FileTooLarge
            | DiagnosticCode::ReadFailed => Level::Warn,
            DiagnosticCode::DirectoryPruned => Level::Info,
            DiagnosticCode::Summary
            | DiagnosticCode::SymlinkSkipped
            | DiagnosticCode::BinaryFileSkipped
            | DiagnosticCode::LossyConversion
            | DiagnosticCode::NoMatches => Level::Debug,
        }
    }
}

enum Level {
    Warn,
    Info,
    Debug,
}

/// A single structured diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: DiagnosticCode,

    pub message: String,

    /// Path the diagnostic is about (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl Diagnostic {
    pub fn new(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Attach the path this diagnostic refers to
    pub fn with_path(mut self, path: &Path) -> Self {
        self.path = Some(normalize_path(path));
        self
    }
}

/// Collects diagnostics for one pipeline run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Diagnostics {
    pub items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log and record a diagnostic
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        let code = diagnostic.code.as_str();
        let path = diagnostic.path.as_deref().unwrap_or("");
        match diagnostic.code.level() {
            Level::Warn => tracing::warn!(code, path, "{}", diagnostic.message),
            Level::Info => tracing::info!(code, path, "{}", diagnostic.message),
            Level::Debug => tracing::debug!(code, path, "{}", diagnostic.message),
        }
        self.items.push(diagnostic);
    }

    pub fn with_code(&self, code: DiagnosticCode) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(move |d| d.code == code)
    }

    /// Paths named by diagnostics of the given code
    pub fn paths_with(&self, code: DiagnosticCode) -> Vec<&str> {
        self.with_code(code)
            .filter_map(|d| d.path.as_deref())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
