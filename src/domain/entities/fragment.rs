//! Declaration fragment
//!
//! One YAML file contributing part of the deployment model. A fragment may
//! wrap its content under a root key (`ziti_deployment` by default); only the
//! wrapped mapping takes part in the merge.

use std::path::{Path, PathBuf};

use serde_yaml_ng::Value;

use super::document::{Mapping, Node};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FragmentError {
    #[error("{0}")]
    Yaml(String),

    #[error("document root must be a mapping, found {found}")]
    NotAMapping { found: &'static str },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    /// Path relative to the base directory
    pub path: PathBuf,
    /// Model content, already unwrapped from the root key
    pub body: Mapping,
}

impl Fragment {
    pub fn new(path: impl Into<PathBuf>, body: Mapping) -> Self {
        Self {
            path: path.into(),
            body,
        }
    }

    /// A fragment with no content (missing or empty file).
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self::new(path, Mapping::new())
    }

    /// Parse fragment text. Empty or `null` documents yield an empty body.
    pub fn parse(path: &Path, content: &str, root_key: &str) -> Result<Self, FragmentError> {
        let value: Value =
            serde_yaml_ng::from_str(content).map_err(|e| FragmentError::Yaml(e.to_string()))?;

        let mut document = match Node::from(value) {
            Node::Map(map) => map,
            node if node.is_null() => Mapping::new(),
            Node::Seq(_) => return Err(FragmentError::NotAMapping { found: "a sequence" }),
            Node::Scalar(_) => return Err(FragmentError::NotAMapping { found: "a scalar" }),
        };

        let body = match document.remove(root_key) {
            Some(Node::Map(inner)) => inner,
            Some(other) => {
                // Root key present but not a mapping: keep the document as-is.
                document.insert(root_key.to_string(), other);
                document
            }
            None => document,
        };

        Ok(Self::new(path, body))
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
