//! Typed deployment model
//!
//! The merged fragment tree is deserialized into these declarations before
//! compilation. Entry names are optional: a missing name is reported by the
//! compiler together with the entry's position. `null` entries are kept as
//! `None` and skipped.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_yaml_ng::Value;

use super::document::{Mapping, Node};
use crate::domain::value_objects::{ResourceState, Semantic};

fn default_all_roles() -> Vec<String> {
    vec!["#all".to_string()]
}

fn default_true() -> bool {
    true
}

fn default_identity_type() -> String {
    "Device".to_string()
}

fn default_enrollment_method() -> String {
    "ott".to_string()
}

/// Root of the deployment model.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DeploymentModel {
    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub identities: Vec<Option<IdentityDecl>>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub services: Vec<Option<ServiceDecl>>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub router_policies: Vec<Option<RouterPolicyDecl>>,
}

impl DeploymentModel {
    /// Deserialize a merged document into the typed model.
    pub fn from_mapping(map: Mapping) -> Result<Self, serde_yaml_ng::Error> {
        if map.is_empty() {
            return Ok(Self::default());
        }
        serde_yaml_ng::from_value(Node::Map(map).to_yaml())
    }

    /// True when there is nothing to compile.
    pub fn is_empty(&self) -> bool {
        self.identities.is_empty() && self.services.is_empty() && self.router_policies.is_empty()
    }
}

/// Model-wide defaults, threaded explicitly into the compiler.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Defaults {
    #[serde(default = "default_all_roles")]
    pub router_roles: Vec<String>,

    #[serde(default = "default_true")]
    pub encryption: bool,

    #[serde(default)]
    pub create_router_policies: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            router_roles: default_all_roles(),
            encryption: true,
            create_router_policies: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IdentityDecl {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(rename = "type", default = "default_identity_type")]
    pub identity_type: String,

    #[serde(default)]
    pub role_attributes: Vec<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default = "default_enrollment_method")]
    pub enrollment_method: String,

    #[serde(default)]
    pub state: ResourceState,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceDecl {
    #[serde(default)]
    pub name: Option<String>,

    /// Raw `host.v1` config payload
    #[serde(default)]
    pub host: Option<Mapping>,

    /// Raw `intercept.v1` config payload
    #[serde(default)]
    pub intercept: Option<Mapping>,

    #[serde(default)]
    pub role_attributes: Option<Vec<String>>,

    /// Shorthand for `role_attributes`; ignored when both are set
    #[serde(default)]
    pub roles: Option<Vec<String>>,

    #[serde(default)]
    pub policies: PolicyDecls,

    #[serde(default)]
    pub encryption: Option<bool>,

    #[serde(default)]
    pub state: ResourceState,
}

impl ServiceDecl {
    pub fn declared_roles(&self) -> Option<&[String]> {
        self.role_attributes
            .as_deref()
            .or(self.roles.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PolicyDecls {
    #[serde(default, deserialize_with = "non_empty_mapping")]
    pub bind: Option<AccessPolicyDecl>,

    #[serde(default, deserialize_with = "non_empty_mapping")]
    pub dial: Option<AccessPolicyDecl>,

    #[serde(default)]
    pub router: RouterPolicySetting,
}

/// Bind or dial policy declared inline on a service.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AccessPolicyDecl {
    #[serde(default)]
    pub roles: Vec<String>,

    /// Single identity name, appended as an attribute reference
    #[serde(default)]
    pub identity: Option<String>,

    #[serde(default)]
    pub service_roles: Vec<String>,

    #[serde(default)]
    pub semantic: Semantic,
}

/// Service edge-router policy declared inline on a service.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RouterPolicyInline {
    #[serde(default)]
    pub roles: Option<Vec<String>>,

    #[serde(default)]
    pub semantic: Semantic,
}

/// Tri-state for `policies.router`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RouterPolicySetting {
    /// `router: false`
    Suppressed,
    /// `router: { ... }` (or `router: true`)
    Explicit(RouterPolicyInline),
    /// Not declared; follow `defaults.create_router_policies`
    #[default]
    Deferred,
}

impl<'de> Deserialize<'de> for RouterPolicySetting {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Self::Deferred),
            Value::Bool(false) => Ok(Self::Suppressed),
            Value::Bool(true) => Ok(Self::Explicit(RouterPolicyInline::default())),
            value @ Value::Mapping(_) => serde_yaml_ng::from_value(value)
                .map(Self::Explicit)
                .map_err(de::Error::custom),
            _ => Err(de::Error::custom(
                "policies.router must be false or a mapping",
            )),
        }
    }
}

/// Global edge-router policy.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RouterPolicyDecl {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default = "default_all_roles")]
    pub edge_router_roles: Vec<String>,

    #[serde(default = "default_all_roles")]
    pub identity_roles: Vec<String>,

    #[serde(default)]
    pub semantic: Semantic,

    #[serde(default)]
    pub state: ResourceState,
}

// A section key with no entries (`services:`) parses as `null`.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

// `null` and `{}` both mean "not declared".
fn non_empty_mapping<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Mapping(map) if map.is_empty() => Ok(None),
        value => serde_yaml_ng::from_value(value)
            .map(Some)
            .map_err(de::Error::custom),
    }
}
