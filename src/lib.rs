//! wordcrawl - recursive regular-expression search with per-file match
//! statistics
//!
//! The pipeline, in order:
//! - parameter normalization (`scan::request`)
//! - path walking with excluded-subdirectory pruning (`scan::walker`)
//! - extension filtering (`scan::extensions`)
//! - binary content gate (`scan::classifier`)
//! - matching and aggregation (`scan::search`)
//!
//! ```no_run
//! use wordcrawl::scan::{scan, ScanParams};
//!
//! let report = scan(ScanParams::new("cat").with_paths(["."])).unwrap();
//! for result in &report.results {
//!     println!("{}: {}", result.file_name, result.match_count);
//! }
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod scan;

pub use crate::core::diagnostics::{Diagnostic, DiagnosticCode, Diagnostics};
pub use crate::core::model::{ScanReport, ScanResult, ScanStats};
pub use crate::error::{ConfigError, ScanError};
pub use crate::scan::{scan, ScanParams, ScanRequest, Scanner};
