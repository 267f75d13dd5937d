//! Property tests for model compilation.

use proptest::prelude::*;

use zitify::domain::entities::{DeploymentModel, Mapping, Node};
use zitify::{compile, TargetNames};

fn service(name: &str, with_host: bool, with_intercept: bool) -> Node {
    let mut decl = Mapping::from([("name".to_string(), Node::from(name))]);
    if with_host {
        decl.insert(
            "host".to_string(),
            Node::Map(Mapping::from([("address".to_string(), Node::from("10.0.0.1"))])),
        );
    }
    if with_intercept {
        decl.insert(
            "intercept".to_string(),
            Node::Map(Mapping::from([("address".to_string(), Node::from("svc.ziti"))])),
        );
    }
    Node::Map(decl)
}

fn model(decls: &[(bool, bool)]) -> DeploymentModel {
    let services = decls
        .iter()
        .enumerate()
        .map(|(i, (host, intercept))| service(&format!("svc-{i}"), *host, *intercept))
        .collect();
    DeploymentModel::from_mapping(Mapping::from([(
        "services".to_string(),
        Node::Seq(services),
    )]))
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the same model and targets always compile to the same output.
    #[test]
    fn property_compile_is_deterministic(
        decls in proptest::collection::vec((any::<bool>(), any::<bool>()), 0..8),
    ) {
        let first = compile(model(&decls), &TargetNames::Unbounded).unwrap();
        let second = compile(model(&decls), &TargetNames::Unbounded).unwrap();
        prop_assert_eq!(first, second);
    }

    /// PROPERTY: one config per declared host/intercept, one service per declaration.
    #[test]
    fn property_config_count_matches_declarations(
        decls in proptest::collection::vec((any::<bool>(), any::<bool>()), 0..8),
    ) {
        let out = compile(model(&decls), &TargetNames::Unbounded).unwrap();
        let expected: usize = decls.iter().map(|(h, i)| *h as usize + *i as usize).sum();

        prop_assert_eq!(out.services.len(), decls.len());
        prop_assert_eq!(out.configs.len(), expected);
        for svc in &out.services {
            let prefix = format!("{}-", svc.name);
            for config in &svc.configs {
                prop_assert!(config.starts_with(&prefix));
            }
        }
    }

    /// PROPERTY: bounded targets never emit a service outside the set.
    #[test]
    fn property_bounded_targets_filter_services(
        decls in proptest::collection::vec((any::<bool>(), any::<bool>()), 0..8),
        picks in proptest::collection::btree_set(0usize..8, 0..4),
    ) {
        let targets = TargetNames::bounded(picks.iter().map(|i| format!("svc-{i}")));
        let out = compile(model(&decls), &targets).unwrap();

        for svc in &out.services {
            prop_assert!(targets.contains(&svc.name));
        }
        let expected = picks.iter().filter(|i| **i < decls.len()).count();
        prop_assert_eq!(out.services.len(), expected);
    }
}
