use crate::errors::CliError;
use crate::GlobalOpts;
use anyhow::Context;
use std::fs;
use std::path::Path;
use uirelease_config::ReleaseConfig;
use uirelease_logger as logger;

/// Remove the output directory. Returns whether anything was removed.
pub fn clean(dist_dir: &Path) -> Result<bool, CliError> {
    if !dist_dir.exists() {
        return Ok(false);
    }
    fs::remove_dir_all(dist_dir).map_err(|e| CliError::io(dist_dir, e))?;
    Ok(true)
}

pub fn handle_clean(_opts: &GlobalOpts) -> anyhow::Result<()> {
    let config = ReleaseConfig::load().context("Failed to load configuration")?;
    let dist = Path::new(&config.paths.dist);

    if clean(dist)? {
        logger::success(&format!("Removed {}", dist.display()));
    } else {
        tracing::debug!("{} already clean", dist.display());
    }
    Ok(())
}
