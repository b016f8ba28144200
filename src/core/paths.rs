//! Path utilities
//!
//! Home expansion for user-supplied roots, extension extraction in the
//! leading-dot form the extension filter compares on, and display
//! normalization to '/' separators.

use std::path::{Path, PathBuf};

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Expand a leading `~` to the user's home directory.
///
/// `~user` forms are left untouched, as is everything when no home
/// directory can be determined.
pub fn expand_home(raw: &str) -> PathBuf {
    let rest = match raw.strip_prefix('~') {
        Some(rest) => rest,
        None => return PathBuf::from(raw),
    };

    if !(rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\')) {
        return PathBuf::from(raw);
    }

    match dirs::home_dir() {
        Some(home) => {
            let rest = rest.trim_start_matches(['/', '\\']);
            if rest.is_empty() {
                home
            } else {
                home.join(rest)
            }
        }
        None => PathBuf::from(raw),
    }
}

/// Extension of a path including the leading dot, or "" if it has none.
///
/// Dotfiles such as `.bashrc` have no extension; `name.` has the extension ".".
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

/// Key used to de-duplicate candidates: the resolved path when it can be
/// resolved, otherwise the path as given.
pub fn dedup_key(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
