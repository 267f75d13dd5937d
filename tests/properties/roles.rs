//! Property tests for role token normalization.

use proptest::prelude::*;

use zitify::domain::entities::{DeploymentModel, Mapping, Node};
use zitify::{compile, RoleToken, TargetNames};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: normalized tokens always start with `#` or `@`.
    #[test]
    fn property_normalized_tokens_are_prefixed(raw in "[#@]?[a-z][a-z0-9-]{0,12}") {
        let token = RoleToken::normalize(&raw);
        prop_assert!(token.as_str().starts_with('#') || token.as_str().starts_with('@'));
    }

    /// PROPERTY: normalization is idempotent.
    #[test]
    fn property_normalize_is_idempotent(raw in "[#@]?[a-z][a-z0-9-]{0,12}") {
        let once = RoleToken::normalize(&raw);
        let twice = RoleToken::normalize(once.as_str());
        prop_assert_eq!(once, twice);
    }

    /// PROPERTY: every role emitted in a service policy is prefixed.
    #[test]
    fn property_policy_roles_are_prefixed(
        roles in proptest::collection::vec("[#@]?[a-z][a-z0-9]{0,8}", 0..5),
    ) {
        let dial = Mapping::from([(
            "roles".to_string(),
            Node::Seq(roles.iter().map(|r| Node::from(r.as_str())).collect()),
        )]);
        let policies = Mapping::from([("dial".to_string(), Node::Map(dial))]);
        let svc = Mapping::from([
            ("name".to_string(), Node::from("web")),
            ("policies".to_string(), Node::Map(policies)),
        ]);
        let model = DeploymentModel::from_mapping(Mapping::from([(
            "services".to_string(),
            Node::Seq(vec![Node::Map(svc)]),
        )]))
        .unwrap();

        let out = compile(model, &TargetNames::Unbounded).unwrap();
        for policy in &out.service_policies {
            for role in policy.service_roles.iter().chain(&policy.identity_roles) {
                prop_assert!(role.as_str().starts_with('#') || role.as_str().starts_with('@'));
            }
        }
    }
}
