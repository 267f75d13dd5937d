//! Ports
//!
//! Interfaces the domain and application layers use to reach the outside
//! world. Implementations live in `infrastructure`.

mod version_history;

pub use version_history::{HistoryQuery, PathChange, Revision, VersionHistory};
