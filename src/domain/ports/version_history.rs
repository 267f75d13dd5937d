//! VersionHistory port
//!
//! Read-only queries against the version-control history of the base
//! directory. Results are three-state so callers can tell "nothing changed"
//! apart from "could not ask".

use std::path::{Path, PathBuf};

use crate::domain::value_objects::ChangeKind;

/// Outcome of a single history query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryQuery<T> {
    Success(T),
    /// The base directory is not under version control
    NoRepository,
    /// The query ran but failed (non-zero exit, timeout, spawn error)
    QueryFailed(String),
}

impl<T> HistoryQuery<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> HistoryQuery<U> {
        match self {
            Self::Success(value) => HistoryQuery::Success(f(value)),
            Self::NoRepository => HistoryQuery::NoRepository,
            Self::QueryFailed(reason) => HistoryQuery::QueryFailed(reason),
        }
    }
}

/// A path reported by a change query, relative to the base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathChange {
    pub path: PathBuf,
    pub kind: ChangeKind,
}

impl PathChange {
    pub fn new(path: impl Into<PathBuf>, kind: ChangeKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// Historical point to read content from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Revision {
    /// The most recent commit
    Head,
    /// The commit before the most recent one
    Previous,
}

impl Revision {
    pub fn as_git_rev(&self) -> &'static str {
        match self {
            Self::Head => "HEAD",
            Self::Previous => "HEAD~1",
        }
    }
}

pub trait VersionHistory {
    /// Whether `base` carries version-control metadata.
    fn is_repository(&self, base: &Path) -> bool;

    /// Uncommitted changes (staged, unstaged, untracked) under `subtree`.
    fn working_tree_changes(&self, base: &Path, subtree: &Path) -> HistoryQuery<Vec<PathChange>>;

    /// Changes between the two most recent commits under `subtree`.
    fn last_commit_changes(&self, base: &Path, subtree: &Path) -> HistoryQuery<Vec<PathChange>>;

    /// Content of `path` as of `revision`.
    fn show(&self, base: &Path, revision: Revision, path: &Path) -> HistoryQuery<String>;
}
