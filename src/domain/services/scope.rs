//! Scope helpers over fragment bodies
//!
//! Only top-level `services` and `identities` entries are inspected; names of
//! derived configs and policies follow from the service name at compile time.

use crate::domain::entities::{Mapping, Node};
use crate::domain::value_objects::ResourceState;

const SCOPED_SECTIONS: [&str; 2] = ["services", "identities"];

fn scoped_entries(body: &Mapping) -> impl Iterator<Item = &Mapping> {
    SCOPED_SECTIONS
        .into_iter()
        .filter_map(move |section| body.get(section).and_then(Node::as_seq))
        .flatten()
        .filter_map(Node::as_map)
}

/// Names of every service and identity declared in a fragment body.
pub fn extract_names(body: &Mapping) -> Vec<String> {
    scoped_entries(body)
        .filter_map(|entry| entry.get("name").and_then(Node::as_str))
        .map(str::to_string)
        .collect()
}

/// Force every service and identity in the body to `state: absent`,
/// overriding whatever state the fragment declared.
pub fn mark_absent(body: &mut Mapping) {
    for section in SCOPED_SECTIONS {
        if let Some(Node::Seq(entries)) = body.get_mut(section) {
            for entry in entries.iter_mut().filter_map(Node::as_map_mut) {
                entry.insert(
                    "state".to_string(),
                    Node::from(ResourceState::Absent.as_str()),
                );
            }
        }
    }
}
