//! Directory-backed theme gallery
//!
//! Layout: one sub-directory per theme, each holding `jquery.ui.theme.css`
//! and an `images/` tree.

use crate::catalog::{list_files, ImageAsset, ThemeCatalog, ThemeVariant};
use crate::errors::ThemeError;
use crate::THEME_CSS_FILE;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct LocalCatalog {
    root: PathBuf,
}

impl LocalCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        LocalCatalog { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl ThemeCatalog for LocalCatalog {
    async fn gallery(&self) -> Result<Vec<Box<dyn ThemeVariant>>, ThemeError> {
        if !self.root.is_dir() {
            return Err(ThemeError::NotInstalled(format!(
                "theme gallery directory {} does not exist; point [themes] gallery in uirelease.toml at an installed gallery",
                self.root.display()
            )));
        }

        let mut entries = tokio::fs::read_dir(&self.root)
            .await
            .map_err(|e| ThemeError::io(&self.root, e))?;
        let mut themes = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| ThemeError::io(&self.root, e))?
        {
            let dir = entry.path();
            if !dir.join(THEME_CSS_FILE).is_file() {
                continue;
            }
            if let Some(folder) = dir.file_name().and_then(|n| n.to_str()) {
                themes.push(LocalTheme {
                    folder: folder.to_string(),
                    dir: dir.clone(),
                });
            }
        }
        themes.sort_by(|a, b| a.folder.cmp(&b.folder));
        debug!("Found {} themes in {:?}", themes.len(), self.root);

        Ok(themes
            .into_iter()
            .map(|theme| Box::new(theme) as Box<dyn ThemeVariant>)
            .collect())
    }
}

#[derive(Debug, Clone)]
pub struct LocalTheme {
    folder: String,
    dir: PathBuf,
}

#[async_trait]
impl ThemeVariant for LocalTheme {
    fn folder_name(&self) -> &str {
        &self.folder
    }

    async fn css(&self) -> Result<String, ThemeError> {
        let path = self.dir.join(THEME_CSS_FILE);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| ThemeError::io(path, e))
    }

    async fn fetch_images(&self) -> Result<Vec<ImageAsset>, ThemeError> {
        let images_dir = self.dir.join("images");
        if !images_dir.is_dir() {
            return Err(ThemeError::io(
                &images_dir,
                std::io::Error::new(std::io::ErrorKind::NotFound, "images directory missing"),
            ));
        }

        let files = list_files(&images_dir)?;
        let mut assets = Vec::with_capacity(files.len());
        for (relative, path) in files {
            let data = tokio::fs::read(&path)
                .await
                .map_err(|e| ThemeError::io(&path, e))?;
            assets.push(ImageAsset::new(relative, data));
        }
        Ok(assets)
    }
}
