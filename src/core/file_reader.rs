//! File reading with an explicit encoding
//!
//! Provides consistent handling for:
//! - Non-UTF-8 content (strict, lossy or Latin-1 decoding)
//! - Oversized files
//! - Files that vanish between enumeration and reading

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::core::diagnostics::{Diagnostic, DiagnosticCode};

/// How file bytes are turned into text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EncodingStrategy {
    /// Strict UTF-8; files that fail to decode are skipped
    #[default]
    Utf8,
    /// UTF-8 with invalid sequences replaced by U+FFFD
    Utf8Lossy,
    /// ISO-8859-1; every byte maps to one character, never fails
    Latin1,
}

impl EncodingStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            EncodingStrategy::Utf8 => "utf8",
            EncodingStrategy::Utf8Lossy => "utf8-lossy",
            EncodingStrategy::Latin1 => "latin1",
        }
    }
}

impl std::str::FromStr for EncodingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(EncodingStrategy::Utf8),
            "utf8-lossy" | "utf-8-lossy" | "lossy" => Ok(EncodingStrategy::Utf8Lossy),
            "latin1" | "latin-1" | "iso-8859-1" => Ok(EncodingStrategy::Latin1),
            _ => Err(format!("Unknown encoding: {}", s)),
        }
    }
}

/// Configuration for file reading
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReadConfig {
    pub encoding: EncodingStrategy,

    /// Files larger than this many bytes are skipped
    pub max_file_size: Option<u64>,
}

/// Result of reading a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileRead {
    /// Decoded text, plus a note when decoding was lossy
    Text {
        content: String,
        note: Option<Diagnostic>,
    },
    /// The file was not read; the diagnostic says why
    Skipped(Diagnostic),
}

/// Read a file's full content as text under the given configuration
pub fn read_text(path: &Path, config: &FileReadConfig) -> FileRead {
    if let Some(limit) = config.max_file_size {
        match fs::metadata(path) {
            Ok(meta) if meta.len() > limit => {
                return FileRead::Skipped(
                    Diagnostic::new(
                        DiagnosticCode::FileTooLarge,
                        format!("File exceeds size limit ({} > {} bytes)", meta.len(), limit),
                    )
                    .with_path(path),
                );
            }
            Ok(_) => {}
            Err(e) => return FileRead::Skipped(io_diagnostic(path, &e)),
        }
    }

    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) => return FileRead::Skipped(io_diagnostic(path, &e)),
    };

    decode(path, bytes, config.encoding)
}

fn decode(path: &Path, bytes: Vec<u8>, encoding: EncodingStrategy) -> FileRead {
    match encoding {
        EncodingStrategy::Utf8 => match String::from_utf8(bytes) {
            Ok(content) => FileRead::Text {
                content,
                note: None,
            },
            Err(e) => FileRead::Skipped(
                Diagnostic::new(
                    DiagnosticCode::DecodeFailed,
                    format!(
                        "Not valid UTF-8 (invalid byte at offset {}); skipped",
                        e.utf8_error().valid_up_to()
                    ),
                )
                .with_path(path),
            ),
        },
        EncodingStrategy::Utf8Lossy => match String::from_utf8(bytes) {
            Ok(content) => FileRead::Text {
                content,
                note: None,
            },
            Err(e) => {
                let content = String::from_utf8_lossy(e.as_bytes()).into_owned();
                FileRead::Text {
                    content,
                    note: Some(
                        Diagnostic::new(
                            DiagnosticCode::LossyConversion,
                            "Lossy UTF-8 conversion applied (some characters replaced)",
                        )
                        .with_path(path),
                    ),
                }
            }
        },
        EncodingStrategy::Latin1 => FileRead::Text {
            content: bytes.iter().map(|&b| b as char).collect(),
            note: None,
        },
    }
}

fn io_diagnostic(path: &Path, err: &std::io::Error) -> Diagnostic {
    let code = if err.kind() == ErrorKind::NotFound {
        DiagnosticCode::FileVanished
    } else {
        DiagnosticCode::ReadFailed
    };
    Diagnostic::new(code, format!("Cannot read file: {}", err)).with_path(path)
}
