//! Zitify - declarative OpenZiti deployment model compiler
//!
//! Zitify merges per-service and per-identity YAML fragments into one
//! deployment model, optionally narrows the work to what changed in git,
//! and compiles the model into the flat resource lists an OpenZiti
//! reconciler applies.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{
    ChangeScopeResolver, DeploymentPipeline, FragmentLoader, LoadedDeployment, PipelineOutput,
    ScopeResolution, ScopeWarning,
};
pub use config::Config;
pub use domain::entities::{CompiledDeployment, DeploymentModel, Fragment, Mapping, Node};
pub use domain::services::{compile, deep_merge, merge_fragments, CompileError};
pub use domain::value_objects::{ChangeKind, ResourceState, RoleToken, TargetNames};
pub use error::{ZitifyError, ZitifyResult};
pub use infrastructure::{FsFragmentSource, GitHistory};
