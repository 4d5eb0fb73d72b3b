use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThemeError {
    /// The catalog source is missing; fatal before any job starts
    #[error("Theme catalog not installed: {0}")]
    NotInstalled(String),

    #[error("IO error at {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("Request to {url} failed: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Invalid catalog URL '{0}'")]
    Url(String),

    #[error("Asset path '{0}' escapes the theme directory")]
    AssetPath(String),

    #[error("Invalid theme folder name '{0}'")]
    FolderName(String),

    #[error("Theme folder '{0}' is listed more than once")]
    DuplicateFolder(String),

    #[error("No CSS layers configured")]
    NoLayers,

    #[error("{0}")]
    Catalog(String),
}

impl ThemeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ThemeError::Io {
            path: path.into(),
            source,
        }
    }
}
