//! Domain Services
//!
//! Pure business logic over the deployment model. No I/O.

mod compiler;
mod merger;
mod scope;

pub use compiler::{compile, CompileError};
pub use merger::{deep_merge, merge_fragments};
pub use scope::{extract_names, mark_absent};
