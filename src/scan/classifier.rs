//! Binary content gate
//!
//! Removes candidates whose content looks binary. Classification sits behind
//! [`BinaryClassifier`]; the default [`ContentInspector`] samples the head of
//! each file with `content_inspector`.

use std::fs::File;
use std::io::{self, ErrorKind, Read};
use std::path::{Path, PathBuf};

use crate::core::diagnostics::{Diagnostic, DiagnosticCode, Diagnostics};
use crate::core::model::ScanStats;

/// Bytes sampled from the start of a file
pub const DEFAULT_SAMPLE_SIZE: usize = 8192;

/// Decides whether a file is binary.
///
/// An `Err` of kind `NotFound` means the file is gone; any other error is a
/// classifier failure. Neither is a classification.
pub trait BinaryClassifier: Send + Sync {
    fn is_binary(&self, path: &Path) -> io::Result<bool>;
}

/// Classifier backed by `content_inspector`
#[derive(Debug, Clone)]
pub struct ContentInspector {
    sample_size: usize,
}

impl ContentInspector {
    pub fn new(sample_size: usize) -> Self {
        Self { sample_size }
    }
}

impl Default for ContentInspector {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_SIZE)
    }
}

impl BinaryClassifier for ContentInspector {
    fn is_binary(&self, path: &Path) -> io::Result<bool> {
        let file = File::open(path)?;
        let mut buffer = Vec::with_capacity(self.sample_size);
        file.take(self.sample_size as u64).read_to_end(&mut buffer)?;
        Ok(content_inspector::inspect(&buffer).is_binary())
    }
}

/// Drop binary candidates unless binaries are included
pub fn filter_binary(
    candidates: Vec<PathBuf>,
    include_binary_files: bool,
    classifier: &dyn BinaryClassifier,
    diagnostics: &mut Diagnostics,
    stats: &mut ScanStats,
) -> Vec<PathBuf> {
    if include_binary_files {
        return candidates;
    }

    let mut text_files = Vec::with_capacity(candidates.len());
    for path in candidates {
        match classifier.is_binary(&path) {
            Ok(false) => text_files.push(path),
            Ok(true) => {
                stats.binary_skipped += 1;
                diagnostics.emit(
                    Diagnostic::new(DiagnosticCode::BinaryFileSkipped, "Binary content; skipped")
                        .with_path(&path),
                );
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                stats.files_skipped += 1;
                diagnostics.emit(
                    Diagnostic::new(
                        DiagnosticCode::FileVanished,
                        "File disappeared before it could be classified",
                    )
                    .with_path(&path),
                );
            }
            Err(e) => {
                stats.files_skipped += 1;
                diagnostics.emit(
                    Diagnostic::new(
                        DiagnosticCode::ClassifierFailed,
                        format!("Cannot classify file: {}", e),
                    )
                    .with_path(&path),
                );
            }
        }
    }
    text_files
}
