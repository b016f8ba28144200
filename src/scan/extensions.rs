//! Extension filter
//!
//! An include list or an exclude list, never both. The two-list input is
//! validated once into an [`ExtensionPolicy`] so the filter itself cannot see
//! a conflicting configuration.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::core::paths::extension_of;
use crate::error::ScanError;

/// Normalize an extension to its leading-dot form; empty entries are dropped
pub fn normalize_extension(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with('.') {
        Some(trimmed.to_string())
    } else {
        Some(format!(".{}", trimmed))
    }
}

fn normalize_all<S: AsRef<str>>(raw: &[S]) -> BTreeSet<String> {
    raw.iter()
        .filter_map(|e| normalize_extension(e.as_ref()))
        .collect()
}

/// Which extensions survive the filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ExtensionPolicy {
    /// No filtering
    #[default]
    All,
    /// Keep only these extensions
    Include(BTreeSet<String>),
    /// Drop these extensions
    Exclude(BTreeSet<String>),
}

impl ExtensionPolicy {
    /// Normalize both lists and reject the case where both are non-empty
    pub fn from_lists<S: AsRef<str>>(included: &[S], excluded: &[S]) -> Result<Self, ScanError> {
        let included = normalize_all(included);
        let excluded = normalize_all(excluded);

        match (included.is_empty(), excluded.is_empty()) {
            (true, true) => Ok(ExtensionPolicy::All),
            (false, true) => Ok(ExtensionPolicy::Include(included)),
            (true, false) => Ok(ExtensionPolicy::Exclude(excluded)),
            (false, false) => Err(ScanError::ConflictingFilter {
                included: included.into_iter().collect(),
                excluded: excluded.into_iter().collect(),
            }),
        }
    }

    /// Whether a file passes the filter (case-sensitive comparison)
    pub fn allows(&self, path: &Path) -> bool {
        match self {
            ExtensionPolicy::All => true,
            ExtensionPolicy::Include(set) => set.contains(&extension_of(path)),
            ExtensionPolicy::Exclude(set) => !set.contains(&extension_of(path)),
        }
    }

    /// Filter candidates, preserving their order
    pub fn apply(&self, candidates: Vec<PathBuf>) -> Vec<PathBuf> {
        match self {
            ExtensionPolicy::All => candidates,
            _ => candidates.into_iter().filter(|p| self.allows(p)).collect(),
        }
    }

    pub fn included(&self) -> Option<&BTreeSet<String>> {
        match self {
            ExtensionPolicy::Include(set) => Some(set),
            _ => None,
        }
    }

    pub fn excluded(&self) -> Option<&BTreeSet<String>> {
        match self {
            ExtensionPolicy::Exclude(set) => Some(set),
            _ => None,
        }
    }
}
