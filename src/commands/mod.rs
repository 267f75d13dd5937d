pub mod compile;
pub mod merge;
pub mod scope;

use std::path::Path;

use anyhow::{Context, Result};
use zitify::Config;

/// Resolve tool config: explicit file, else project/user discovery.
pub fn load_config(base_dir: &Path, explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => {
            let (config, warnings) = Config::load_with_warnings(path)
                .with_context(|| format!("loading {}", path.display()))?;
            for warning in &warnings {
                tracing::warn!(%warning, "ignoring config key");
            }
            Ok(config.with_env_overrides())
        }
        None => Ok(Config::load_or_default(Some(base_dir))),
    }
}
