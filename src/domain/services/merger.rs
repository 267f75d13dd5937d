//! Fragment merger
//!
//! Deep-merges fragment bodies into one accumulator:
//! - map into map: merge recursively
//! - sequence: append to the accumulator's sequence (never union or replace)
//! - anything else: the later fragment overwrites
//!
//! Appending means overlapping fragments duplicate entries. Callers rely on
//! that to see every declaration, so it is kept as-is.

use crate::domain::entities::{Fragment, Mapping, Node};

pub fn deep_merge(target: &mut Mapping, source: Mapping) {
    for (key, value) in source {
        match value {
            Node::Map(inner) => {
                match target
                    .entry(key)
                    .or_insert_with(|| Node::Map(Mapping::new()))
                {
                    Node::Map(existing) => deep_merge(existing, inner),
                    slot => *slot = Node::Map(inner),
                }
            }
            Node::Seq(items) => match target.entry(key).or_insert_with(|| Node::Seq(Vec::new())) {
                Node::Seq(existing) => existing.extend(items),
                slot => *slot = Node::Seq(items),
            },
            scalar @ Node::Scalar(_) => {
                target.insert(key, scalar);
            }
        }
    }
}

/// Merge fragments in the given order into a fresh accumulator.
pub fn merge_fragments<I>(fragments: I) -> Mapping
where
    I: IntoIterator<Item = Fragment>,
{
    let mut merged = Mapping::new();
    for fragment in fragments {
        deep_merge(&mut merged, fragment.body);
    }
    merged
}
