//! Role tokens
//!
//! Policies reference entities by role token: `@name` for an explicit entity,
//! `#attr` for a shared role attribute. Compiled output never carries an
//! unprefixed token, which `RoleToken` enforces by construction.

use serde::Serialize;

const ATTRIBUTE_PREFIX: char = '#';
const ENTITY_PREFIX: char = '@';

/// A prefixed role reference as emitted in policy role lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RoleToken(String);

impl RoleToken {
    /// Normalize a declared token: `@`/`#` tokens are kept, anything else
    /// becomes an attribute reference.
    pub fn normalize(raw: &str) -> Self {
        if raw.starts_with(ENTITY_PREFIX) || raw.starts_with(ATTRIBUTE_PREFIX) {
            Self(raw.to_string())
        } else {
            Self::attribute(raw)
        }
    }

    /// Attribute reference (`#name`).
    pub fn attribute(name: &str) -> Self {
        Self(format!("{ATTRIBUTE_PREFIX}{name}"))
    }

    pub fn normalize_all<S: AsRef<str>>(raw: &[S]) -> Vec<Self> {
        raw.iter().map(|r| Self::normalize(r.as_ref())).collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl std::fmt::Display for RoleToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for RoleToken {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Remove every leading `#` from a role attribute name.
pub fn strip_attribute_prefix(raw: &str) -> String {
    raw.trim_start_matches(ATTRIBUTE_PREFIX).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_keeps_prefixed_tokens() {
        assert_eq!(RoleToken::normalize("@alice"), "@alice");
        assert_eq!(RoleToken::normalize("#web"), "#web");
    }

    #[test]
    fn normalize_prefixes_bare_tokens_as_attributes() {
        assert_eq!(RoleToken::normalize("web"), "#web");
    }

    #[test]
    fn strip_removes_all_leading_hashes() {
        assert_eq!(strip_attribute_prefix("##web"), "web");
        assert_eq!(strip_attribute_prefix("web#1"), "web#1");
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&RoleToken::attribute("all")).unwrap();
        assert_eq!(json, "\"#all\"");
    }
}
