use std::path::Path;

use anyhow::Result;
use zitify::DeploymentPipeline;

use super::load_config;

/// Print the scope report as JSON. Smart scoping is always on here.
pub fn cmd_scope(base_dir: &Path, config: Option<&Path>) -> Result<()> {
    let config = load_config(base_dir, config)?;
    let pipeline = DeploymentPipeline::new(base_dir, config).with_smart(true);

    let loaded = pipeline.load()?;
    println!("{}", serde_json::to_string_pretty(&loaded.scope.report())?);
    Ok(())
}
