//! Change scope resolver
//!
//! Works out which fragments changed since the relevant reference point and
//! recovers the content of deleted ones.
//!
//! ## Flow
//!
//! 1. No repository at the base: warn and process everything
//! 2. Uncommitted changes under the declarations subtree, if any
//! 3. Otherwise the changes made by the most recent commit
//! 4. Deleted fragments are read back from history with every service and
//!    identity forced to `state: absent`
//!
//! Query failures degrade to "no results" with a recorded warning.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::LayoutConfig;
use crate::domain::entities::Fragment;
use crate::domain::ports::{HistoryQuery, PathChange, Revision, VersionHistory};
use crate::domain::services::{extract_names, mark_absent};
use crate::domain::value_objects::{ChangeKind, TargetNames};

/// Non-fatal problem met while resolving scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScopeWarning {
    /// Smart scoping requested but the base is not a repository
    RepositoryUnavailable { base: PathBuf },
    /// A history query failed; its result was treated as empty
    HistoryQueryFailed { query: &'static str, reason: String },
    /// A deleted fragment could not be recovered and contributes nothing
    RecoveryFailed { path: PathBuf, reason: String },
}

impl std::fmt::Display for ScopeWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RepositoryUnavailable { base } => write!(
                f,
                "smart scoping enabled but {} is not a git repository; processing all fragments",
                base.display()
            ),
            Self::HistoryQueryFailed { query, reason } => {
                write!(f, "{} query failed, treating as empty: {}", query, reason)
            }
            Self::RecoveryFailed { path, reason } => {
                write!(f, "could not recover deleted fragment {}: {}", path.display(), reason)
            }
        }
    }
}

/// Result of change-scope resolution, filled in further while fragments load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScopeResolution {
    enabled: bool,
    changes: BTreeMap<PathBuf, ChangeKind>,
    recovered: Vec<Fragment>,
    names: BTreeSet<String>,
    warnings: Vec<ScopeWarning>,
}

impl ScopeResolution {
    /// Scoping not requested: everything is in scope.
    pub fn disabled() -> Self {
        Self::default()
    }

    fn unavailable(warning: ScopeWarning) -> Self {
        Self {
            warnings: vec![warning],
            ..Self::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Classification of a base-relative fragment path.
    pub fn classify(&self, path: &Path) -> ChangeKind {
        self.changes.get(path).copied().unwrap_or_default()
    }

    /// Changed and deleted fragments; unlisted paths are unchanged.
    pub fn changes(&self) -> &BTreeMap<PathBuf, ChangeKind> {
        &self.changes
    }

    /// Deleted fragments recovered from history, already marked absent.
    pub fn recovered(&self) -> &[Fragment] {
        &self.recovered
    }

    pub fn warnings(&self) -> &[ScopeWarning] {
        &self.warnings
    }

    /// Record the names declared by an on-disk fragment if it changed.
    pub fn observe(&mut self, fragment: &Fragment) {
        if self.enabled && self.classify(&fragment.path) == ChangeKind::Changed {
            self.names.extend(extract_names(&fragment.body));
        }
    }

    pub fn target_names(&self) -> TargetNames {
        if self.enabled {
            TargetNames::Bounded(self.names.clone())
        } else {
            TargetNames::Unbounded
        }
    }

    pub fn report(&self) -> ScopeReport<'_> {
        ScopeReport {
            enabled: self.enabled,
            changes: &self.changes,
            recovered: self.recovered.iter().map(|f| f.path.as_path()).collect(),
            target_names: self.target_names(),
            warnings: &self.warnings,
        }
    }
}

/// Serializable view of a `ScopeResolution`.
#[derive(Debug, Serialize)]
pub struct ScopeReport<'a> {
    pub enabled: bool,
    pub changes: &'a BTreeMap<PathBuf, ChangeKind>,
    pub recovered: Vec<&'a Path>,
    pub target_names: TargetNames,
    pub warnings: &'a [ScopeWarning],
}

pub struct ChangeScopeResolver<'a, H: VersionHistory + ?Sized> {
    history: &'a H,
    layout: &'a LayoutConfig,
}

impl<'a, H: VersionHistory + ?Sized> ChangeScopeResolver<'a, H> {
    pub fn new(history: &'a H, layout: &'a LayoutConfig) -> Self {
        Self { history, layout }
    }

    pub fn resolve(&self, base: &Path) -> ScopeResolution {
        if !self.history.is_repository(base) {
            return self.unavailable(base);
        }

        let subtree = self.layout.deployments_dir.as_path();
        let mut resolution = ScopeResolution {
            enabled: true,
            ..ScopeResolution::default()
        };

        let working_tree = match self.history.working_tree_changes(base, subtree) {
            HistoryQuery::Success(changes) => changes,
            HistoryQuery::NoRepository => return self.unavailable(base),
            HistoryQuery::QueryFailed(reason) => {
                resolution.warn(ScopeWarning::HistoryQueryFailed {
                    query: "working tree status",
                    reason,
                });
                Vec::new()
            }
        };

        let (changes, recover_from) = if working_tree.is_empty() {
            let committed = match self.history.last_commit_changes(base, subtree) {
                HistoryQuery::Success(changes) => changes,
                HistoryQuery::NoRepository => {
                    resolution.warn(ScopeWarning::HistoryQueryFailed {
                        query: "last commit diff",
                        reason: "repository unavailable".to_string(),
                    });
                    Vec::new()
                }
                HistoryQuery::QueryFailed(reason) => {
                    resolution.warn(ScopeWarning::HistoryQueryFailed {
                        query: "last commit diff",
                        reason,
                    });
                    Vec::new()
                }
            };
            (committed, Revision::Previous)
        } else {
            (working_tree, Revision::Head)
        };

        for PathChange { path, kind } in changes {
            if self.layout.is_fragment_path(&path) {
                resolution.changes.insert(path, kind);
            }
        }

        let deleted: Vec<PathBuf> = resolution
            .changes
            .iter()
            .filter(|(_, kind)| **kind == ChangeKind::Deleted)
            .map(|(path, _)| path.clone())
            .collect();
        for path in deleted {
            self.recover(base, recover_from, path, &mut resolution);
        }

        tracing::info!(
            changed = resolution.changes.len(),
            recovered = resolution.recovered.len(),
            targets = resolution.names.len(),
            "resolved change scope"
        );
        resolution
    }

    fn unavailable(&self, base: &Path) -> ScopeResolution {
        let warning = ScopeWarning::RepositoryUnavailable {
            base: base.to_path_buf(),
        };
        tracing::warn!("{}", warning);
        ScopeResolution::unavailable(warning)
    }

    fn recover(
        &self,
        base: &Path,
        revision: Revision,
        path: PathBuf,
        resolution: &mut ScopeResolution,
    ) {
        let content = match self.history.show(base, revision, &path) {
            HistoryQuery::Success(content) if !content.trim().is_empty() => content,
            HistoryQuery::Success(_) => {
                resolution.warn(ScopeWarning::RecoveryFailed {
                    path,
                    reason: "no content in history".to_string(),
                });
                return;
            }
            HistoryQuery::NoRepository => {
                resolution.warn(ScopeWarning::RecoveryFailed {
                    path,
                    reason: "repository unavailable".to_string(),
                });
                return;
            }
            HistoryQuery::QueryFailed(reason) => {
                resolution.warn(ScopeWarning::RecoveryFailed { path, reason });
                return;
            }
        };

        match Fragment::parse(&path, &content, &self.layout.root_key) {
            Ok(mut fragment) => {
                mark_absent(&mut fragment.body);
                resolution.names.extend(extract_names(&fragment.body));
                tracing::debug!(path = %path.display(), "recovered deleted fragment");
                resolution.recovered.push(fragment);
            }
            Err(e) => resolution.warn(ScopeWarning::RecoveryFailed {
                path,
                reason: e.to_string(),
            }),
        }
    }
}

impl ScopeResolution {
    fn warn(&mut self, warning: ScopeWarning) {
        tracing::warn!("{}", warning);
        self.warnings.push(warning);
    }
}
