//! Path walker
//!
//! Expands search roots into a flat, de-duplicated list of regular files.
//! Excluded subdirectories are pruned before descent, so nothing below them
//! is ever enumerated.
//!
//! Two backends: plain `walkdir` by default, and the `ignore` crate when the
//! walk should also honor `.gitignore`/`.ignore` files.

use ignore::WalkBuilder;
use std::collections::{BTreeSet, HashSet};
use std::fs::FileType;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::debug;
use walkdir::WalkDir;

use crate::core::diagnostics::{Diagnostic, DiagnosticCode, Diagnostics};
use crate::core::model::ScanStats;
use crate::core::paths::dedup_key;
use crate::scan::request::WalkOptions;

/// Walks search roots and collects candidate files
#[derive(Debug, Clone)]
pub struct PathWalker {
    excluded: Arc<BTreeSet<String>>,
    options: WalkOptions,
}

/// What to do with a non-directory entry
enum EntryKind {
    File,
    SymlinkedDir,
    Dangling,
    Other,
}

/// Candidate list under construction, de-duplicated on the resolved path
struct Collector {
    seen: HashSet<PathBuf>,
    files: Vec<PathBuf>,
}

impl Collector {
    fn new() -> Self {
        Self {
            seen: HashSet::new(),
            files: Vec::new(),
        }
    }

    fn push(&mut self, path: PathBuf) {
        if self.seen.insert(dedup_key(&path)) {
            self.files.push(path);
        } else {
            debug!(path = %path.display(), "duplicate candidate dropped");
        }
    }
}

impl PathWalker {
    pub fn new(excluded: BTreeSet<String>, options: WalkOptions) -> Self {
        Self {
            excluded: Arc::new(excluded),
            options,
        }
    }

    /// Whether a subdirectory with this basename is walked into
    pub fn should_descend(&self, name: &str) -> bool {
        !self.excluded.contains(name)
    }

    /// Enumerate candidate files under every root, in root order.
    ///
    /// A root that is a file is taken as-is; a directory root is walked with
    /// siblings sorted by name. A file reachable from several roots appears
    /// once, under the path it was first found at.
    pub fn collect(
        &self,
        roots: &[PathBuf],
        diagnostics: &mut Diagnostics,
        stats: &mut ScanStats,
    ) -> Vec<PathBuf> {
        let mut collector = Collector::new();

        for root in roots {
            if root.is_file() {
                collector.push(root.clone());
            } else if self.options.respect_ignore_files {
                self.walk_ignore(root, &mut collector, diagnostics, stats);
            } else {
                self.walk_plain(root, &mut collector, diagnostics, stats);
            }
        }

        stats.candidates = collector.files.len();
        debug!(candidates = stats.candidates, "walk complete");
        collector.files
    }

    fn walk_plain(
        &self,
        root: &Path,
        collector: &mut Collector,
        diagnostics: &mut Diagnostics,
        stats: &mut ScanStats,
    ) {
        let mut entries = WalkDir::new(root)
            .follow_links(self.options.follow_symlinks)
            .sort_by_file_name()
            .into_iter();

        while let Some(entry) = entries.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let mut diagnostic = Diagnostic::new(DiagnosticCode::WalkError, err.to_string());
                    if let Some(path) = err.path() {
                        diagnostic = diagnostic.with_path(path);
                    }
                    diagnostics.emit(diagnostic);
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                let name = entry.file_name().to_string_lossy();
                if entry.depth() > 0 && !self.should_descend(&name) {
                    entries.skip_current_dir();
                    record_pruned(entry.path(), diagnostics, stats);
                }
                continue;
            }

            let file_type = entry.file_type();
            self.handle_entry(entry.into_path(), Some(file_type), collector, diagnostics);
        }
    }

    fn walk_ignore(
        &self,
        root: &Path,
        collector: &mut Collector,
        diagnostics: &mut Diagnostics,
        stats: &mut ScanStats,
    ) {
        let pruned: Arc<Mutex<Vec<PathBuf>>> = Arc::new(Mutex::new(Vec::new()));

        let mut builder = WalkBuilder::new(root);
        builder
            .standard_filters(false)
            .hidden(false)
            .parents(true)
            .ignore(true)
            .git_ignore(true)
            .git_exclude(true)
            .require_git(false)
            .follow_links(self.options.follow_symlinks)
            .sort_by_file_name(|a, b| a.cmp(b));

        let excluded = Arc::clone(&self.excluded);
        let pruned_sink = Arc::clone(&pruned);
        builder.filter_entry(move |entry| {
            let is_dir = entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false);
            if entry.depth() == 0 || !is_dir {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            if excluded.contains(name.as_ref()) {
                if let Ok(mut sink) = pruned_sink.lock() {
                    sink.push(entry.path().to_path_buf());
                }
                return false;
            }
            true
        });

        // filter_entry runs inside next(), so draining the sink after each
        // step reports pruned directories in walk order.
        let drain_pruned = |diagnostics: &mut Diagnostics, stats: &mut ScanStats| {
            let pruned_dirs = pruned
                .lock()
                .map(|mut sink| std::mem::take(&mut *sink))
                .unwrap_or_default();
            for dir in pruned_dirs {
                record_pruned(&dir, diagnostics, stats);
            }
        };

        for result in builder.build() {
            drain_pruned(diagnostics, stats);
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    let mut diagnostic = Diagnostic::new(DiagnosticCode::WalkError, err.to_string());
                    if let Some(path) = ignore_error_path(&err) {
                        diagnostic = diagnostic.with_path(path);
                    }
                    diagnostics.emit(diagnostic);
                    continue;
                }
            };

            let file_type = entry.file_type();
            if file_type.map(|ft| ft.is_dir()).unwrap_or(false) {
                continue;
            }
            self.handle_entry(entry.into_path(), file_type, collector, diagnostics);
        }
        drain_pruned(diagnostics, stats);
    }

    fn handle_entry(
        &self,
        path: PathBuf,
        file_type: Option<FileType>,
        collector: &mut Collector,
        diagnostics: &mut Diagnostics,
    ) {
        match classify_entry(&path, file_type) {
            EntryKind::File => collector.push(path),
            EntryKind::SymlinkedDir => diagnostics.emit(
                Diagnostic::new(
                    DiagnosticCode::SymlinkSkipped,
                    "Symlinked directory not followed",
                )
                .with_path(&path),
            ),
            EntryKind::Dangling => diagnostics.emit(
                Diagnostic::new(DiagnosticCode::SymlinkSkipped, "Dangling symlink")
                    .with_path(&path),
            ),
            EntryKind::Other => {
                debug!(path = %path.display(), "not a regular file; ignored");
            }
        }
    }
}

fn classify_entry(path: &Path, file_type: Option<FileType>) -> EntryKind {
    let is_symlink = match file_type {
        Some(ft) if ft.is_file() => return EntryKind::File,
        Some(ft) => ft.is_symlink(),
        None => path.is_symlink(),
    };

    if !is_symlink {
        return if path.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        };
    }

    // Symlinks to files are candidates; symlinks to directories are not walked
    // unless following is enabled, in which case they never reach here.
    if path.is_file() {
        EntryKind::File
    } else if path.is_dir() {
        EntryKind::SymlinkedDir
    } else {
        EntryKind::Dangling
    }
}

/// Path an `ignore` error is about, looking through its wrappers
fn ignore_error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::Loop { child, .. } => Some(child.as_path()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            ignore_error_path(err)
        }
        _ => None,
    }
}

fn record_pruned(path: &Path, diagnostics: &mut Diagnostics, stats: &mut ScanStats) {
    stats.pruned_directories += 1;
    diagnostics.emit(
        Diagnostic::new(
            DiagnosticCode::DirectoryPruned,
            "Excluded directory; subtree not walked",
        )
        .with_path(path),
    );
}
