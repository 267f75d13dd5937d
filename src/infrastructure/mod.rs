//! Infrastructure Layer
//!
//! Adapters that touch the outside world: the fragment tree on disk and the
//! `git` history of the base directory.

pub mod fragments;
pub mod git;

pub use fragments::FsFragmentSource;
pub use git::GitHistory;
