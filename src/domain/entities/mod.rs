//! Domain Entities
//!
//! - `document` - the untyped fragment tree the merger works on
//! - `fragment` - one parsed declaration file
//! - `model` - the typed deployment model the compiler consumes
//! - `resources` - the flat records handed to the reconciler

mod document;
mod fragment;
mod model;
mod resources;

pub use document::{Mapping, Node, Scalar};
pub use fragment::{Fragment, FragmentError};
pub use model::{
    AccessPolicyDecl, Defaults, DeploymentModel, IdentityDecl, PolicyDecls, RouterPolicyDecl,
    RouterPolicyInline, RouterPolicySetting, ServiceDecl,
};
pub use resources::{
    CompiledDeployment, Config, ConfigType, Identity, PolicyType, RouterPolicy, Service,
    ServicePolicy, ServiceRouterPolicy,
};
