//! Release archives via the external `zip` tool

use crate::errors::CliError;
use std::path::Path;
use tokio::process::Command;
use tracing::{debug, info};
use uirelease_config::require_tool;

/// Run `zip -r <dest> <source>` inside `working_dir`
///
/// `dest` and `source` are relative to `working_dir`. A failed run leaves any
/// partial archive in place.
pub async fn create_archive(dest: &str, source: &str, working_dir: &Path) -> Result<(), CliError> {
    let zip = require_tool("zip")?;
    debug!("Running: {:?} -r {} {} (in {:?})", zip, dest, source, working_dir);

    let output = Command::new(&zip)
        .args(["-r", dest, source])
        .current_dir(working_dir)
        .output()
        .await
        .map_err(|e| CliError::io(&zip, e))?;

    if !output.status.success() {
        return Err(CliError::Process {
            tool: "zip".to_string(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    info!("Zipped {}", working_dir.join(dest).display());
    Ok(())
}
