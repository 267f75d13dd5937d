//! Property tests for fragment merging.

use proptest::prelude::*;

use zitify::domain::entities::{Fragment, Mapping, Node};
use zitify::merge_fragments;

fn named_entries(prefix: &'static str, count: usize) -> Node {
    Node::Seq(
        (0..count)
            .map(|i| {
                Node::Map(Mapping::from([(
                    "name".to_string(),
                    Node::from(format!("{prefix}-{i}").as_str()),
                )]))
            })
            .collect(),
    )
}

fn fragment(services: usize, identities: usize) -> Fragment {
    Fragment::new(
        "deployments/services/generated.yml",
        Mapping::from([
            ("services".to_string(), named_entries("svc", services)),
            ("identities".to_string(), named_entries("id", identities)),
        ]),
    )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: merged sequence length is the sum of every fragment's length.
    #[test]
    fn property_merge_appends_sequences(
        sizes in proptest::collection::vec((0usize..5, 0usize..5), 0..6),
    ) {
        let merged = merge_fragments(sizes.iter().map(|(s, i)| fragment(*s, *i)));

        let expected_services: usize = sizes.iter().map(|(s, _)| s).sum();
        let expected_identities: usize = sizes.iter().map(|(_, i)| i).sum();

        if sizes.is_empty() {
            prop_assert!(merged.is_empty());
        } else {
            prop_assert_eq!(merged["services"].as_seq().unwrap().len(), expected_services);
            prop_assert_eq!(merged["identities"].as_seq().unwrap().len(), expected_identities);
        }
    }

    /// PROPERTY: the last scalar written for a key wins.
    #[test]
    fn property_merge_last_scalar_wins(values in proptest::collection::vec(any::<bool>(), 1..8)) {
        let fragments = values.iter().map(|v| {
            Fragment::new("deployments/services/defaults.yml", Mapping::from([(
                "defaults".to_string(),
                Node::Map(Mapping::from([(
                    "encryption".to_string(),
                    Node::from(if *v { "on" } else { "off" }),
                )])),
            )]))
        });
        let merged = merge_fragments(fragments);

        let expected = if *values.last().unwrap() { "on" } else { "off" };
        prop_assert_eq!(
            merged["defaults"].as_map().unwrap()["encryption"].as_str(),
            Some(expected)
        );
    }
}
