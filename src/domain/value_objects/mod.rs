//! Value Objects
//!
//! Immutable types shared by the merger, the scope resolver and the compiler.

mod change_kind;
mod resource_state;
mod role_token;
mod semantic;
mod target_names;

pub use change_kind::ChangeKind;
pub use resource_state::ResourceState;
pub use role_token::{strip_attribute_prefix, RoleToken};
pub use semantic::Semantic;
pub use target_names::TargetNames;
