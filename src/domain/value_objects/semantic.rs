//! Policy matching semantic

use serde::{Deserialize, Serialize};

/// How a policy's role list is matched against entity attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Semantic {
    /// Entity matches if it carries any of the roles
    #[default]
    AnyOf,
    /// Entity matches only if it carries every role
    AllOf,
}
