//! Scan pipeline
//!
//! Runs the stages in order over a validated [`ScanRequest`]:
//! walk, extension filter, binary gate, search. Per-file problems become
//! diagnostics; only request validation can fail the whole run.

use tracing::{debug, info};

use crate::core::diagnostics::{Diagnostic, DiagnosticCode, Diagnostics};
use crate::core::model::{ScanReport, ScanStats};
use crate::core::util::summary_line;
use crate::error::ScanError;
use crate::scan::classifier::{filter_binary, BinaryClassifier, ContentInspector};
use crate::scan::request::{ScanParams, ScanRequest};
use crate::scan::search::{search_files, SearchOptions};
use crate::scan::walker::PathWalker;

/// Runs scans with a fixed binary classifier
pub struct Scanner {
    classifier: Box<dyn BinaryClassifier>,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner {
    pub fn new() -> Self {
        Self::with_classifier(ContentInspector::default())
    }

    pub fn with_classifier(classifier: impl BinaryClassifier + 'static) -> Self {
        Self {
            classifier: Box::new(classifier),
        }
    }

    /// Run the full pipeline. Results are in walk order.
    pub fn run(&self, request: &ScanRequest) -> ScanReport {
        let mut diagnostics = Diagnostics::new();
        let mut stats = ScanStats::default();

        info!(
            pattern = request.pattern(),
            roots = request.search_paths().len(),
            "scan started"
        );

        let walker = PathWalker::new(
            request.excluded_subdirectories().clone(),
            request.walk_options(),
        );
        let candidates = walker.collect(request.search_paths(), &mut diagnostics, &mut stats);

        let before = candidates.len();
        let candidates = request.extensions().apply(candidates);
        stats.extension_filtered = before - candidates.len();
        debug!(
            kept = candidates.len(),
            dropped = stats.extension_filtered,
            "extension filter applied"
        );

        let candidates = filter_binary(
            candidates,
            request.include_binary_files(),
            self.classifier.as_ref(),
            &mut diagnostics,
            &mut stats,
        );

        let options = SearchOptions {
            matcher: request.matcher(),
            pattern: request.pattern(),
            collapse_whitespace: request.collapse_whitespace(),
            read_config: request.read_config(),
        };
        let results = search_files(&candidates, &options, &mut diagnostics, &mut stats);

        diagnostics.emit(Diagnostic::new(
            DiagnosticCode::Summary,
            summary_line(stats.files_matched, stats.files_inspected),
        ));

        ScanReport {
            results,
            stats,
            diagnostics,
        }
    }
}

/// Validate parameters and run a scan with the default classifier
pub fn scan(params: ScanParams) -> Result<ScanReport, ScanError> {
    let request = ScanRequest::new(params)?;
    Ok(Scanner::new().run(&request))
}
