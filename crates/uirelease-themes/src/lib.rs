//! Theme gallery packaging
//!
//! Turns a theme catalog into the themes package: the unmodified base theme
//! plus, per gallery theme, its theme layer, a concatenated CSS bundle and its
//! images. See [`ThemePipeline`].

pub mod catalog;
pub mod concat;
pub mod errors;
pub mod local;
pub mod pipeline;
pub mod remote;

pub use catalog::{ImageAsset, ThemeCatalog, ThemeVariant};
pub use errors::ThemeError;
pub use local::LocalCatalog;
pub use pipeline::{
    package_themes, ThemeFailure, ThemeJobState, ThemeOptions, ThemePipeline, ThemeReport,
};
pub use remote::RemoteCatalog;

/// Per-theme layer file name
pub const THEME_CSS_FILE: &str = "jquery.ui.theme.css";

/// Per-theme concatenated bundle file name
pub const BUNDLE_CSS_FILE: &str = "jquery-ui.css";

/// Base theme location relative to a release tree
pub const BASE_THEME_DIR: &str = "themes/base";

/// Open the gallery at `location`: an `http(s)://` index URL or a directory
pub fn open_catalog(location: &str) -> Result<Box<dyn ThemeCatalog>, ThemeError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(RemoteCatalog::new(location)?))
    } else {
        Ok(Box::new(LocalCatalog::new(location)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_catalog_directory_not_installed() {
        let Ok(dir) = tempfile::TempDir::new() else {
            return;
        };
        let missing = dir.path().join("gallery");
        let Some(location) = missing.to_str() else {
            return;
        };
        let Ok(catalog) = open_catalog(location) else {
            panic!("directory catalogs always open");
        };
        assert!(matches!(catalog.gallery().await, Err(ThemeError::NotInstalled(_))));
    }

    #[test]
    fn test_open_catalog_url() {
        assert!(open_catalog("https://download.example.org/themes/gallery.json").is_ok());
        assert!(matches!(open_catalog("https://"), Err(ThemeError::Url(_))));
    }
}
