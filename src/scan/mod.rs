//! Scan pipeline stages
//!
//! - `request`: parameter normalization and validation
//! - `walker`: directory traversal with subtree pruning
//! - `extensions`: include/exclude extension filter
//! - `classifier`: binary content gate
//! - `pattern`: pattern matching capability
//! - `search`: per-file matching and aggregation
//! - `pipeline`: the stages wired together

pub mod classifier;
pub mod extensions;
pub mod pattern;
pub mod pipeline;
pub mod request;
pub mod search;
pub mod walker;

pub use classifier::{BinaryClassifier, ContentInspector};
pub use extensions::ExtensionPolicy;
pub use pattern::{PatternMatcher, RegexMatcher};
pub use pipeline::{scan, Scanner};
pub use request::{ScanParams, ScanRequest, WalkOptions};
pub use walker::PathWalker;
