//! Flat resource records
//!
//! Compiler output. Every record is flat, carries fully normalized role
//! lists and a desired `state`, and has a name that is a deterministic
//! function of its owning declaration.

use serde::Serialize;

use super::document::Mapping;
use crate::domain::value_objects::{ResourceState, RoleToken, Semantic};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identity {
    pub name: String,
    #[serde(rename = "type")]
    pub identity_type: String,
    pub role_attributes: Vec<String>,
    pub enrollment_method: String,
    pub state: ResourceState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConfigType {
    #[serde(rename = "host.v1")]
    HostV1,
    #[serde(rename = "intercept.v1")]
    InterceptV1,
}

impl ConfigType {
    /// Suffix appended to the service name to derive the config name.
    pub fn name_suffix(&self) -> &'static str {
        match self {
            Self::HostV1 => "host-v1",
            Self::InterceptV1 => "intercept-v1",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    pub name: String,
    #[serde(rename = "type")]
    pub config_type: ConfigType,
    pub data: Mapping,
    pub state: ResourceState,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Service {
    pub name: String,
    pub role_attributes: Vec<String>,
    pub configs: Vec<String>,
    pub encryption_required: bool,
    pub state: ResourceState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PolicyType {
    Bind,
    Dial,
}

impl PolicyType {
    pub fn name_suffix(&self) -> &'static str {
        match self {
            Self::Bind => "bind",
            Self::Dial => "dial",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServicePolicy {
    pub name: String,
    #[serde(rename = "type")]
    pub policy_type: PolicyType,
    pub service_roles: Vec<RoleToken>,
    pub identity_roles: Vec<RoleToken>,
    pub semantic: Semantic,
    pub state: ResourceState,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouterPolicy {
    pub name: String,
    pub edge_router_roles: Vec<RoleToken>,
    pub identity_roles: Vec<RoleToken>,
    pub semantic: Semantic,
    pub state: ResourceState,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceRouterPolicy {
    pub name: String,
    pub service_roles: Vec<RoleToken>,
    pub edge_router_roles: Vec<RoleToken>,
    pub semantic: Semantic,
    pub state: ResourceState,
}

/// The six flat lists consumed by the reconcilers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompiledDeployment {
    #[serde(rename = "openziti_identities")]
    pub identities: Vec<Identity>,
    #[serde(rename = "openziti_configs")]
    pub configs: Vec<Config>,
    #[serde(rename = "openziti_services")]
    pub services: Vec<Service>,
    #[serde(rename = "openziti_service_policies")]
    pub service_policies: Vec<ServicePolicy>,
    #[serde(rename = "openziti_router_policies")]
    pub router_policies: Vec<RouterPolicy>,
    #[serde(rename = "openziti_service_router_policies")]
    pub service_router_policies: Vec<ServiceRouterPolicy>,
}

impl CompiledDeployment {
    pub fn is_empty(&self) -> bool {
        self.resource_count() == 0
    }

    /// Total number of records across all six lists.
    pub fn resource_count(&self) -> usize {
        self.identities.len()
            + self.configs.len()
            + self.services.len()
            + self.service_policies.len()
            + self.router_policies.len()
            + self.service_router_policies.len()
    }
}
