//! HTTP theme gallery
//!
//! The gallery index is a JSON document:
//!
//! ```json
//! { "themes": [ { "folder": "ui-lightness",
//!                 "css": "ui-lightness/jquery.ui.theme.css",
//!                 "images": ["ui-bg_glass_65_ffffff_1x400.png"] } ] }
//! ```
//!
//! `css` and the optional `images_base` are resolved against the index URL;
//! image paths are resolved against `images_base`, defaulting to
//! `<folder>/images/`.

use crate::catalog::{ensure_unique_folders, is_contained, ImageAsset, ThemeCatalog, ThemeVariant};
use crate::errors::ThemeError;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Deserialize)]
struct GalleryIndex {
    themes: Vec<GalleryEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct GalleryEntry {
    folder: String,
    css: String,
    #[serde(default)]
    images_base: Option<String>,
    #[serde(default)]
    images: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct RemoteCatalog {
    client: Client,
    index_url: Url,
}

impl RemoteCatalog {
    pub fn new(index_url: &str) -> Result<Self, ThemeError> {
        let index_url = Url::parse(index_url).map_err(|_| ThemeError::Url(index_url.to_string()))?;
        let client = Client::builder()
            .user_agent(concat!("ui-release/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| ThemeError::Http {
                url: index_url.to_string(),
                source,
            })?;
        Ok(RemoteCatalog { client, index_url })
    }

    pub fn index_url(&self) -> &Url {
        &self.index_url
    }
}

#[async_trait]
impl ThemeCatalog for RemoteCatalog {
    async fn gallery(&self) -> Result<Vec<Box<dyn ThemeVariant>>, ThemeError> {
        let index: GalleryIndex = get(&self.client, &self.index_url)
            .await?
            .json()
            .await
            .map_err(|source| http_error(&self.index_url, source))?;
        debug!(
            "Gallery index {} lists {} themes",
            self.index_url,
            index.themes.len()
        );
        ensure_unique_folders(index.themes.iter().map(|entry| entry.folder.as_str()))?;

        index
            .themes
            .into_iter()
            .map(|entry| {
                let css_url = join(&self.index_url, &entry.css)?;
                let images_base = match &entry.images_base {
                    Some(base) => join(&self.index_url, base)?,
                    None => join(&self.index_url, &format!("{}/images/", entry.folder))?,
                };
                Ok(Box::new(RemoteTheme {
                    client: self.client.clone(),
                    folder: entry.folder,
                    css_url,
                    images_base,
                    images: entry.images,
                }) as Box<dyn ThemeVariant>)
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct RemoteTheme {
    client: Client,
    folder: String,
    css_url: Url,
    images_base: Url,
    images: Vec<String>,
}

#[async_trait]
impl ThemeVariant for RemoteTheme {
    fn folder_name(&self) -> &str {
        &self.folder
    }

    async fn css(&self) -> Result<String, ThemeError> {
        get(&self.client, &self.css_url)
            .await?
            .text()
            .await
            .map_err(|source| http_error(&self.css_url, source))
    }

    async fn fetch_images(&self) -> Result<Vec<ImageAsset>, ThemeError> {
        let mut assets = Vec::with_capacity(self.images.len());
        for path in &self.images {
            if !is_contained(path) {
                return Err(ThemeError::AssetPath(path.clone()));
            }
            let url = join(&self.images_base, path)?;
            let data = get(&self.client, &url)
                .await?
                .bytes()
                .await
                .map_err(|source| http_error(&url, source))?;
            assets.push(ImageAsset::new(path.clone(), data.to_vec()));
        }
        Ok(assets)
    }
}

async fn get(client: &Client, url: &Url) -> Result<reqwest::Response, ThemeError> {
    debug!("GET {}", url);
    client
        .get(url.clone())
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|source| http_error(url, source))
}

fn join(base: &Url, relative: &str) -> Result<Url, ThemeError> {
    base.join(relative)
        .map_err(|_| ThemeError::Url(format!("{base} + {relative}")))
}

fn http_error(url: &Url, source: reqwest::Error) -> ThemeError {
    ThemeError::Http {
        url: url.to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{package_themes, ThemeJobState};
    use crate::{BUNDLE_CSS_FILE, THEME_CSS_FILE};
    use serde_json::json;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn serve(server: &MockServer, route: &str, body: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(body)
            .mount(server)
            .await;
    }

    fn catalog(server: &MockServer) -> RemoteCatalog {
        let Ok(catalog) = RemoteCatalog::new(&format!("{}/themes/gallery.json", server.uri())) else {
            panic!("mock server url is valid");
        };
        catalog
    }

    fn release_tree(root: &Path) -> Vec<String> {
        let base = root.join("themes").join("base");
        assert!(fs::create_dir_all(&base).is_ok());
        assert!(fs::write(base.join("jquery.ui.core.css"), ".ui-helper-hidden{}").is_ok());
        assert!(fs::write(base.join(THEME_CSS_FILE), "/* base */").is_ok());
        vec![
            "themes/base/jquery.ui.core.css".to_string(),
            "themes/base/jquery.ui.theme.css".to_string(),
        ]
    }

    #[tokio::test]
    async fn test_remote_gallery_packages_and_isolates_missing_image() {
        let server = MockServer::start().await;
        let index = json!({
            "themes": [
                {
                    "folder": "ui-lightness",
                    "css": "ui-lightness/jquery.ui.theme.css",
                    "images": ["ui-icons_222222_256x240.png"]
                },
                {
                    "folder": "ui-darkness",
                    "css": "ui-darkness.css",
                    "images_base": "/assets/darkness/",
                    "images": ["ui-icons_cccccc_256x240.png"]
                }
            ]
        });
        let icon = vec![0x89_u8, b'P', b'N', b'G', 0x00, 0xff];
        serve(&server, "/themes/gallery.json", ResponseTemplate::new(200).set_body_json(&index)).await;
        serve(
            &server,
            "/themes/ui-lightness/jquery.ui.theme.css",
            ResponseTemplate::new(200).set_body_string("/* ui-lightness */"),
        )
        .await;
        serve(
            &server,
            "/themes/ui-lightness/images/ui-icons_222222_256x240.png",
            ResponseTemplate::new(200).set_body_bytes(icon.clone()),
        )
        .await;
        serve(
            &server,
            "/themes/ui-darkness.css",
            ResponseTemplate::new(200).set_body_string("/* ui-darkness */"),
        )
        .await;
        serve(
            &server,
            "/assets/darkness/ui-icons_cccccc_256x240.png",
            ResponseTemplate::new(404),
        )
        .await;

        let Ok(dir) = TempDir::new() else {
            return;
        };
        let dist = dir.path().join("dist");
        let layers = release_tree(&dist);
        let target = dir.path().join("themes-package");

        let Ok(report) = package_themes(&catalog(&server), &layers, &dist, &target).await else {
            panic!("run should complete");
        };

        assert_eq!(report.succeeded, ["ui-lightness"]);
        assert_eq!(report.failures.len(), 1);
        let failure = &report.failures[0];
        assert_eq!(failure.folder, "ui-darkness");
        assert_eq!(failure.last_state, ThemeJobState::ImagesRequested);
        assert!(matches!(&failure.error, ThemeError::Http { url, .. } if url.ends_with("/assets/darkness/ui-icons_cccccc_256x240.png")));

        let lightness = target.join("themes").join("ui-lightness");
        assert!(fs::read_to_string(lightness.join(BUNDLE_CSS_FILE))
            .is_ok_and(|css| css == ".ui-helper-hidden{}\n/* ui-lightness */"));
        assert!(fs::read(lightness.join("images").join("ui-icons_222222_256x240.png"))
            .is_ok_and(|bytes| bytes == icon));

        let darkness = target.join("themes").join("ui-darkness");
        assert!(darkness.join(BUNDLE_CSS_FILE).is_file());
        assert!(!darkness.join("images").exists());
    }

    #[tokio::test]
    async fn test_remote_gallery_rejects_duplicate_folders() {
        let server = MockServer::start().await;
        let index = json!({
            "themes": [
                { "folder": "redmond", "css": "redmond/a.css" },
                { "folder": "redmond", "css": "redmond/b.css" }
            ]
        });
        serve(&server, "/themes/gallery.json", ResponseTemplate::new(200).set_body_json(&index)).await;

        let result = catalog(&server).gallery().await;
        assert!(matches!(result, Err(ThemeError::DuplicateFolder(folder)) if folder == "redmond"));
    }

    #[tokio::test]
    async fn test_missing_index_is_http_error() {
        let server = MockServer::start().await;
        let result = catalog(&server).gallery().await;
        assert!(matches!(result, Err(ThemeError::Http { .. })));
    }

    #[test]
    fn test_rejects_relative_index_url() {
        assert!(matches!(
            RemoteCatalog::new("gallery/index.json"),
            Err(ThemeError::Url(_))
        ));
    }

    #[test]
    fn test_join_resolves_against_index() {
        let Ok(index) = Url::parse("https://download.example.org/themes/gallery.json") else {
            panic!("valid url");
        };
        let joined = join(&index, "ui-darkness/images/");
        assert!(joined.is_ok_and(|u| u.as_str() == "https://download.example.org/themes/ui-darkness/images/"));
    }

    #[test]
    fn test_gallery_index_parses_optional_fields() {
        let json = r#"{ "themes": [ { "folder": "ui-lightness", "css": "ui-lightness.css" } ] }"#;
        let Ok(index) = serde_json::from_str::<GalleryIndex>(json) else {
            panic!("index should parse");
        };
        assert_eq!(index.themes.len(), 1);
        assert!(index.themes[0].images.is_empty());
        assert!(index.themes[0].images_base.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_gallery_is_an_error() {
        let Ok(catalog) = RemoteCatalog::new("http://127.0.0.1:9/gallery.json") else {
            panic!("valid url");
        };
        let result = catalog.gallery().await;
        assert!(matches!(result, Err(ThemeError::Http { .. })));
    }
}
