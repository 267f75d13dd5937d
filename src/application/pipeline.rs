//! Deployment compilation pipeline
//!
//! ## Flow
//!
//! 1. Resolve change scope (only when smart scoping is on)
//! 2. Load and merge fragments, collecting target names
//! 3. Deserialize the merged document into the typed model
//! 4. Compile the model into flat resource lists

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::domain::entities::{CompiledDeployment, DeploymentModel};
use crate::domain::ports::VersionHistory;
use crate::domain::services::compile;
use crate::domain::value_objects::TargetNames;
use crate::error::{ZitifyError, ZitifyResult};
use crate::infrastructure::GitHistory;

use super::loader::{FragmentLoader, LoadedDeployment};
use super::scope::{ChangeScopeResolver, ScopeResolution};

/// Output of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub deployment: CompiledDeployment,
    pub target_names: TargetNames,
    pub scope: ScopeResolution,
}

/// Load + scope + compile for one base directory.
#[derive(Debug, Clone)]
pub struct DeploymentPipeline<H = GitHistory> {
    base_dir: PathBuf,
    config: Config,
    history: H,
}

impl DeploymentPipeline<GitHistory> {
    /// Create a pipeline backed by the `git` binary from the config.
    pub fn new(base_dir: impl Into<PathBuf>, config: Config) -> Self {
        let history = GitHistory::from_config(&config.scope);
        Self {
            base_dir: base_dir.into(),
            config,
            history,
        }
    }
}

impl<H: VersionHistory> DeploymentPipeline<H> {
    /// Swap the history backend.
    pub fn with_history<H2: VersionHistory>(self, history: H2) -> DeploymentPipeline<H2> {
        DeploymentPipeline {
            base_dir: self.base_dir,
            config: self.config,
            history,
        }
    }

    /// Enable or disable smart scoping.
    pub fn with_smart(mut self, smart: bool) -> Self {
        self.config.scope.smart = smart;
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn resolve_scope(&self) -> ScopeResolution {
        if !self.config.scope.smart {
            return ScopeResolution::disabled();
        }
        ChangeScopeResolver::new(&self.history, &self.config.layout).resolve(&self.base_dir)
    }

    pub fn load(&self) -> ZitifyResult<LoadedDeployment> {
        let scope = self.resolve_scope();
        FragmentLoader::new(&self.config.layout).load(&self.base_dir, scope)
    }

    /// Run the whole pipeline.
    pub fn compile(&self) -> ZitifyResult<PipelineOutput> {
        let loaded = self.load()?;
        let target_names = loaded.target_names();

        let model = DeploymentModel::from_mapping(loaded.model).map_err(|e| {
            ZitifyError::InvalidModel {
                message: e.to_string(),
            }
        })?;
        let deployment = compile(model, &target_names)?;

        if deployment.is_empty() {
            tracing::info!(
                scoped = !target_names.is_unbounded(),
                "no resources in scope; nothing to reconcile"
            );
        }
        tracing::info!(
            resources = deployment.resource_count(),
            identities = deployment.identities.len(),
            configs = deployment.configs.len(),
            services = deployment.services.len(),
            service_policies = deployment.service_policies.len(),
            router_policies = deployment.router_policies.len(),
            service_router_policies = deployment.service_router_policies.len(),
            "compiled deployment model"
        );

        Ok(PipelineOutput {
            deployment,
            target_names,
            scope: loaded.scope,
        })
    }
}
