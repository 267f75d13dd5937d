//! Target name set used to scope compilation

use std::collections::BTreeSet;

use serde::{Serialize, Serializer};

/// Which service/identity names the compiler should emit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TargetNames {
    /// Process every declared entity
    #[default]
    Unbounded,
    /// Process only the named entities (possibly none)
    Bounded(BTreeSet<String>),
}

impl TargetNames {
    pub fn bounded<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Bounded(names.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, name: &str) -> bool {
        match self {
            Self::Unbounded => true,
            Self::Bounded(names) => names.contains(name),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, Self::Unbounded)
    }

    pub fn names(&self) -> Option<&BTreeSet<String>> {
        match self {
            Self::Unbounded => None,
            Self::Bounded(names) => Some(names),
        }
    }
}

// Unbounded serializes as `null`, matching "no filter" for downstream consumers.
impl Serialize for TargetNames {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.names().serialize(serializer)
    }
}
