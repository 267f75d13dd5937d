use std::path::Path;

use anyhow::Result;
use zitify::DeploymentPipeline;

use super::load_config;

pub fn cmd_merge(base_dir: &Path, config: Option<&Path>, smart: bool) -> Result<()> {
    let mut config = load_config(base_dir, config)?;
    if smart {
        config.scope.smart = true;
    }

    let loaded = DeploymentPipeline::new(base_dir, config).load()?;
    print!("{}", loaded.to_yaml()?);
    Ok(())
}
