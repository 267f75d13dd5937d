//! Deployment model compiler
//!
//! Flattens the hierarchical deployment model into the six resource lists
//! the reconcilers diff against the controller. Pure function: the same
//! model and target set always produce the same output.
//!
//! ## Derived names
//!
//! Every derived resource is named after its owning service:
//! `<svc>-host-v1`, `<svc>-intercept-v1`, `<svc>-bind`, `<svc>-dial`,
//! `<svc>-router`.

use crate::domain::entities::{
    AccessPolicyDecl, CompiledDeployment, Config, ConfigType, Defaults, DeploymentModel, Identity,
    IdentityDecl, Mapping, Node, PolicyType, RouterPolicy, RouterPolicyDecl, RouterPolicyInline,
    RouterPolicySetting, Service, ServiceDecl, ServicePolicy, ServiceRouterPolicy,
};
use crate::domain::value_objects::{
    strip_attribute_prefix, ResourceState, RoleToken, TargetNames,
};

/// Structural error in the deployment model.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CompileError {
    #[error("{kind} entry #{index} has no 'name' field")]
    MissingName { kind: &'static str, index: usize },
}

/// Compile a deployment model into flat resource lists.
///
/// Services and identities outside `targets` are skipped. Global router
/// policies are never scoped.
pub fn compile(
    model: DeploymentModel,
    targets: &TargetNames,
) -> Result<CompiledDeployment, CompileError> {
    let mut out = CompiledDeployment::default();
    if model.is_empty() {
        return Ok(out);
    }

    let DeploymentModel {
        defaults,
        identities,
        services,
        router_policies,
    } = model;

    for (index, decl) in identities.into_iter().enumerate() {
        let Some(decl) = decl else { continue };
        let name = required_name(decl.name.clone(), "identity", index)?;
        if targets.contains(&name) {
            out.identities.push(compile_identity(name, decl));
        }
    }

    for (index, decl) in services.into_iter().enumerate() {
        let Some(decl) = decl else { continue };
        let name = required_name(decl.name.clone(), "service", index)?;
        if targets.contains(&name) {
            compile_service(name, decl, &defaults, &mut out);
        }
    }

    for (index, decl) in router_policies.into_iter().enumerate() {
        let Some(decl) = decl else { continue };
        let name = required_name(decl.name.clone(), "router policy", index)?;
        out.router_policies.push(compile_router_policy(name, decl));
    }

    Ok(out)
}

fn required_name(
    name: Option<String>,
    kind: &'static str,
    index: usize,
) -> Result<String, CompileError> {
    name.ok_or(CompileError::MissingName { kind, index })
}

fn compile_identity(name: String, decl: IdentityDecl) -> Identity {
    let mut role_attributes: Vec<String> = decl
        .role_attributes
        .iter()
        .map(|r| strip_attribute_prefix(r))
        .collect();
    role_attributes.extend(decl.tags);

    Identity {
        name,
        identity_type: decl.identity_type,
        role_attributes,
        enrollment_method: decl.enrollment_method,
        state: decl.state,
    }
}

fn compile_service(
    name: String,
    decl: ServiceDecl,
    defaults: &Defaults,
    out: &mut CompiledDeployment,
) {
    let state = decl.state;
    let role_attributes = match decl.declared_roles() {
        Some(roles) => roles.iter().map(|r| strip_attribute_prefix(r)).collect(),
        None => vec![name.clone()],
    };

    let mut config_names = Vec::new();
    if let Some(host) = decl.host {
        let config = derived_config(&name, ConfigType::HostV1, normalize_host(host), state);
        config_names.push(config.name.clone());
        out.configs.push(config);
    }
    if let Some(intercept) = decl.intercept {
        let config = derived_config(
            &name,
            ConfigType::InterceptV1,
            normalize_intercept(intercept),
            state,
        );
        config_names.push(config.name.clone());
        out.configs.push(config);
    }

    out.services.push(Service {
        name: name.clone(),
        role_attributes,
        configs: config_names,
        encryption_required: decl.encryption.unwrap_or(defaults.encryption),
        state,
    });

    let policies = decl.policies;
    if let Some(bind) = policies.bind {
        out.service_policies
            .push(access_policy(&name, PolicyType::Bind, bind, state));
    }
    if let Some(dial) = policies.dial {
        out.service_policies
            .push(access_policy(&name, PolicyType::Dial, dial, state));
    }

    let router = match policies.router {
        RouterPolicySetting::Suppressed => None,
        RouterPolicySetting::Explicit(inline) => Some(inline),
        RouterPolicySetting::Deferred if defaults.create_router_policies => {
            Some(RouterPolicyInline::default())
        }
        RouterPolicySetting::Deferred => None,
    };
    if let Some(inline) = router {
        out.service_router_policies
            .push(service_router_policy(&name, inline, defaults, state));
    }
}

fn derived_config(
    service: &str,
    config_type: ConfigType,
    data: Mapping,
    state: ResourceState,
) -> Config {
    Config {
        name: format!("{service}-{}", config_type.name_suffix()),
        config_type,
        data,
        state,
    }
}

fn normalize_host(mut data: Mapping) -> Mapping {
    data.entry("protocol".to_string())
        .or_insert_with(|| Node::from("tcp"));
    data
}

/// Normalize shorthand intercept fields into the `intercept.v1` schema.
fn normalize_intercept(mut data: Mapping) -> Mapping {
    if let Some(port) = data.remove("port") {
        let range = Mapping::from([
            ("low".to_string(), port.clone()),
            ("high".to_string(), port),
        ]);
        data.insert("portRanges".to_string(), Node::Seq(vec![Node::Map(range)]));
    } else if let Some(ranges) = data.remove("port_ranges") {
        data.insert("portRanges".to_string(), ranges);
    }

    if let Some(protocol) = data.remove("protocol") {
        data.insert("protocols".to_string(), Node::Seq(vec![protocol]));
    } else if !data.contains_key("protocols") {
        data.insert("protocols".to_string(), Node::Seq(vec![Node::from("tcp")]));
    }

    if let Some(address) = data.remove("address") {
        data.insert("addresses".to_string(), Node::Seq(vec![address]));
    }

    data
}

fn access_policy(
    service: &str,
    policy_type: PolicyType,
    decl: AccessPolicyDecl,
    state: ResourceState,
) -> ServicePolicy {
    let mut identity_roles = RoleToken::normalize_all(&decl.roles);
    // Named identities are referenced through their attribute (`#name`),
    // not as `@name`; reconcilers match on that convention.
    if let Some(identity) = &decl.identity {
        identity_roles.push(RoleToken::attribute(identity));
    }

    let mut service_roles = vec![RoleToken::attribute(service)];
    service_roles.extend(RoleToken::normalize_all(&decl.service_roles));

    ServicePolicy {
        name: format!("{service}-{}", policy_type.name_suffix()),
        policy_type,
        service_roles,
        identity_roles,
        semantic: decl.semantic,
        state,
    }
}

fn service_router_policy(
    service: &str,
    inline: RouterPolicyInline,
    defaults: &Defaults,
    state: ResourceState,
) -> ServiceRouterPolicy {
    let edge_router_roles = match &inline.roles {
        Some(roles) => RoleToken::normalize_all(roles),
        None => RoleToken::normalize_all(&defaults.router_roles),
    };

    ServiceRouterPolicy {
        name: format!("{service}-router"),
        service_roles: vec![RoleToken::attribute(service)],
        edge_router_roles,
        semantic: inline.semantic,
        state,
    }
}

fn compile_router_policy(name: String, decl: RouterPolicyDecl) -> RouterPolicy {
    RouterPolicy {
        name,
        edge_router_roles: RoleToken::normalize_all(&decl.edge_router_roles),
        identity_roles: RoleToken::normalize_all(&decl.identity_roles),
        semantic: decl.semantic,
        state: decl.state,
    }
}
