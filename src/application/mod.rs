//! Application Layer
//!
//! Use cases that coordinate the domain with infrastructure:
//!
//! - `scope` - change scope resolution against version history
//! - `loader` - fragment discovery and merge
//! - `pipeline` - load, scope and compile in one call

pub mod loader;
pub mod pipeline;
pub mod scope;

pub use loader::{FragmentLoader, LoadedDeployment};
pub use pipeline::{DeploymentPipeline, PipelineOutput};
pub use scope::{ChangeScopeResolver, ScopeReport, ScopeResolution, ScopeWarning};
