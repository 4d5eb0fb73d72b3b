use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while generating plugin descriptors
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Malformed data in {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Malformed category defaults in {}: {source}", path.display())]
    Defaults {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid override for plugin '{plugin}' in {}: {source}", path.display())]
    InvalidPlugin {
        path: PathBuf,
        plugin: String,
        source: serde_json::Error,
    },

    #[error("Descriptor name '{0}' is not a plain file name")]
    InvalidName(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to serialize descriptor: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ManifestError {
    /// Load errors invalidate shared input and abort the whole run
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            ManifestError::Read { .. }
                | ManifestError::Malformed { .. }
                | ManifestError::Defaults { .. }
                | ManifestError::InvalidPlugin { .. }
        )
    }
}
