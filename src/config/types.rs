//! Configuration type definitions

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ZitifyResult;

use super::loader::{self, ConfigWarning};

/// Project config file name, looked up in the base directory
pub const PROJECT_CONFIG_FILE: &str = "zitify.toml";

/// Where fragments live and how they are recognised
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_deployments_dir")]
    pub deployments_dir: PathBuf,

    #[serde(default = "default_services_dir")]
    pub services_dir: PathBuf,

    #[serde(default = "default_identities_dir")]
    pub identities_dir: PathBuf,

    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Wrapper key whose mapping is merged instead of the whole document
    #[serde(default = "default_root_key")]
    pub root_key: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            deployments_dir: default_deployments_dir(),
            services_dir: default_services_dir(),
            identities_dir: default_identities_dir(),
            extensions: default_extensions(),
            root_key: default_root_key(),
        }
    }
}

impl LayoutConfig {
    /// Fragment roots relative to the base directory, in merge order.
    pub fn fragment_roots(&self) -> [PathBuf; 2] {
        [
            self.deployments_dir.join(&self.services_dir),
            self.deployments_dir.join(&self.identities_dir),
        ]
    }

    pub fn has_fragment_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.extensions.iter().any(|x| x == e))
            .unwrap_or(false)
    }

    /// Whether a base-relative path is a fragment under one of the roots.
    pub fn is_fragment_path(&self, path: &Path) -> bool {
        self.has_fragment_extension(path)
            && self
                .fragment_roots()
                .iter()
                .any(|root| path.starts_with(root))
    }
}

fn default_deployments_dir() -> PathBuf {
    PathBuf::from("deployments")
}

fn default_services_dir() -> PathBuf {
    PathBuf::from("services")
}

fn default_identities_dir() -> PathBuf {
    PathBuf::from("identities")
}

fn default_extensions() -> Vec<String> {
    vec!["yml".to_string(), "yaml".to_string()]
}

fn default_root_key() -> String {
    "ziti_deployment".to_string()
}

/// Smart-scoping configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeConfig {
    /// Scope compilation to fragments changed in version control
    #[serde(default)]
    pub smart: bool,

    #[serde(default = "default_git_binary")]
    pub git_binary: String,

    /// Upper bound for each history query
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            smart: false,
            git_binary: default_git_binary(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ScopeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_git_binary() -> String {
    "git".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub scope: ScopeConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> ZitifyResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> ZitifyResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from project config, user config, or defaults
    pub fn load_or_default(base_dir: Option<&Path>) -> Self {
        loader::load_or_default(base_dir)
    }

    /// Apply environment variable overrides (ZITIFY_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }
}
