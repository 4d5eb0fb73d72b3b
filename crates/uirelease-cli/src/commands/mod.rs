pub mod clean;
pub mod config;
pub mod manifest;
pub mod tasks;
pub mod themes;

use anyhow::Context;
use std::path::Path;
use uirelease_config::ReleaseConfig;
use uirelease_manifest::{read_package_metadata, PackageMetadata};

/// Release configuration plus the package metadata it points at
pub(crate) fn load_release() -> anyhow::Result<(ReleaseConfig, PackageMetadata)> {
    let path = ReleaseConfig::path();
    let config = ReleaseConfig::load_from_path(&path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    let metadata = read_package_metadata(Path::new(&config.package.metadata))?;
    tracing::debug!("Releasing version {}", metadata.version);
    Ok((config, metadata))
}
