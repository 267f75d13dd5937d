//! Fragment change classification

use serde::Serialize;

/// How a fragment changed relative to the reference revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    #[default]
    Unchanged,
    Changed,
    Deleted,
}

impl ChangeKind {
    /// Classify a two-letter `git status --porcelain` code (`XY`).
    ///
    /// A deletion on either side wins; everything else (added, modified,
    /// renamed, untracked) counts as changed.
    pub fn from_porcelain(code: &str) -> Self {
        if code.contains('D') {
            Self::Deleted
        } else {
            Self::Changed
        }
    }

    /// Classify a `git diff --name-status` code (`M`, `A`, `D`, `R100`, ...).
    pub fn from_name_status(code: &str) -> Self {
        if code.starts_with('D') {
            Self::Deleted
        } else {
            Self::Changed
        }
    }
}
