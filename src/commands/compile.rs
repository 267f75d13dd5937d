use std::path::Path;

use anyhow::Result;
use zitify::DeploymentPipeline;

use super::load_config;

pub fn cmd_compile(
    base_dir: &Path,
    config: Option<&Path>,
    smart: bool,
    pretty: bool,
) -> Result<()> {
    let mut config = load_config(base_dir, config)?;
    if smart {
        config.scope.smart = true;
    }

    let output = DeploymentPipeline::new(base_dir, config).compile()?;
    let json = if pretty {
        serde_json::to_string_pretty(&output.deployment)?
    } else {
        serde_json::to_string(&output.deployment)?
    };
    println!("{json}");
    Ok(())
}
