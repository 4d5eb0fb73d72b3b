//! Centralized error types for the ui-release CLI
//!
//! Library crates keep their own error enums; this one wraps them and adds
//! the failures of the staging, archive and hash steps.

use std::io;
use std::path::PathBuf;
use thiserror::Error;
use uirelease_config::ConfigError;
use uirelease_manifest::ManifestError;
use uirelease_themes::ThemeError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Theme(#[from] ThemeError),

    #[error("IO error at {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("Source '{}' does not exist", .0.display())]
    MissingSource(PathBuf),

    #[error("{tool} exited with {status}: {stderr}")]
    Process {
        tool: String,
        status: String,
        stderr: String,
    },

    #[error("{0} theme(s) failed to package")]
    ThemeFailures(usize),

    #[error("No {kind} task named '{name}'")]
    UnknownTask { kind: &'static str, name: String },
}

impl CliError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CliError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::*;

    #[test]
    fn test_unknown_task_display() {
        let err = CliError::UnknownTask {
            kind: "copy",
            name: "cdn".to_string(),
        };
        assert_eq!(err.to_string(), "No copy task named 'cdn'");
    }

    #[test]
    fn test_theme_error_is_transparent() {
        let err = CliError::from(ThemeError::NoLayers);
        assert_eq!(err.to_string(), "No CSS layers configured");
    }
}
