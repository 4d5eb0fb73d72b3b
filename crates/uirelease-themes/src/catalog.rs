//! Theme catalog interface
//!
//! A catalog enumerates the gallery of theme variants. Each variant produces
//! its own CSS text and fetches its own image set; both may suspend on I/O.

use crate::errors::ThemeError;
use async_trait::async_trait;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// One image of a theme, `path` relative to the theme's `images/` directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    pub path: String,
    pub data: Vec<u8>,
}

impl ImageAsset {
    pub fn new(path: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        ImageAsset {
            path: path.into(),
            data: data.into(),
        }
    }
}

/// A themeable style variant
#[async_trait]
pub trait ThemeVariant: Send + Sync {
    /// Folder name under `themes/`, unique within a gallery
    fn folder_name(&self) -> &str;

    /// Theme layer CSS text
    async fn css(&self) -> Result<String, ThemeError>;

    /// The theme's image set
    async fn fetch_images(&self) -> Result<Vec<ImageAsset>, ThemeError>;
}

/// Source of theme variants
#[async_trait]
pub trait ThemeCatalog: Send + Sync {
    /// Enumerate the gallery. Each call starts a fresh enumeration.
    async fn gallery(&self) -> Result<Vec<Box<dyn ThemeVariant>>, ThemeError>;
}

/// A relative path made only of normal components
pub(crate) fn is_contained(path: &str) -> bool {
    let path = Path::new(path);
    !path.as_os_str().is_empty()
        && path
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
}

/// Fail on the first folder name that appears twice
pub(crate) fn ensure_unique_folders<'a>(
    folders: impl IntoIterator<Item = &'a str>,
) -> Result<(), ThemeError> {
    let mut seen = HashSet::new();
    for folder in folders {
        if !seen.insert(folder) {
            return Err(ThemeError::DuplicateFolder(folder.to_string()));
        }
    }
    Ok(())
}

/// Every file below `dir`, sorted, as `(relative path with '/' separators, absolute path)`
pub(crate) fn list_files(dir: &Path) -> Result<Vec<(String, PathBuf)>, ThemeError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().map_or_else(|| dir.to_path_buf(), Path::to_path_buf);
            ThemeError::io(path, std::io::Error::other(e.to_string()))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(dir)
            .map_err(|_| ThemeError::AssetPath(entry.path().display().to_string()))?
            .to_string_lossy()
            .replace('\\', "/");
        files.push((relative, entry.into_path()));
    }
    Ok(files)
}
