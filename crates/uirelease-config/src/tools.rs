//! External executable lookup

use crate::ConfigError;
use std::path::PathBuf;
use which::which;

/// Resolve `tool` on PATH, failing with an actionable message
pub fn require_tool(tool: &str) -> Result<PathBuf, ConfigError> {
    which(tool).map_err(|_| ConfigError::ToolNotFound {
        tool: tool.to_string(),
        hint: install_hint(tool),
    })
}

fn install_hint(tool: &str) -> String {
    match tool {
        "zip" => "Install Info-ZIP (e.g. `apt install zip` or `brew install zip`).".to_string(),
        other => format!("Install '{other}' and make sure it is on PATH."),
    }
}
