//! Theme packaging
//!
//! Every gallery theme becomes `<target>/themes/<folder>/` holding the
//! standalone theme layer, a full CSS bundle and the theme's images. Jobs are
//! started together and driven on the calling task; a failing job never
//! cancels its siblings and is reported in the [`ThemeReport`].

use crate::catalog::{ensure_unique_folders, is_contained, list_files, ThemeCatalog, ThemeVariant};
use crate::concat::{bundle_layers, concat_files};
use crate::errors::ThemeError;
use crate::{BASE_THEME_DIR, BUNDLE_CSS_FILE, THEME_CSS_FILE};
use futures::stream::{FuturesUnordered, StreamExt};
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeOptions {
    /// Staged release tree holding `themes/base` and the CSS layers
    pub dist_dir: PathBuf,
    /// Themes package root
    pub target_dir: PathBuf,
    /// Relative to `dist_dir`; the last entry is the placeholder theme layer
    pub css_layers: Vec<String>,
}

/// Progress of one theme job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeJobState {
    Pending,
    CssWritten,
    BundleConcatenated,
    ImagesRequested,
    ImagesWritten,
    Failed,
}

impl fmt::Display for ThemeJobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ThemeJobState::Pending => "pending",
            ThemeJobState::CssWritten => "css written",
            ThemeJobState::BundleConcatenated => "bundle concatenated",
            ThemeJobState::ImagesRequested => "images requested",
            ThemeJobState::ImagesWritten => "images written",
            ThemeJobState::Failed => "failed",
        };
        f.write_str(label)
    }
}

#[derive(Debug)]
pub struct ThemeFailure {
    pub folder: String,
    /// Last state the job reached before failing
    pub last_state: ThemeJobState,
    pub error: ThemeError,
}

impl fmt::Display for ThemeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "theme '{}' failed after {}: {}",
            self.folder, self.last_state, self.error
        )
    }
}

#[derive(Debug, Default)]
pub struct ThemeReport {
    pub succeeded: Vec<String>,
    pub failures: Vec<ThemeFailure>,
}

impl ThemeReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failures.len()
    }

    /// Final state of a theme's job, if the theme was part of the run
    pub fn state_of(&self, folder: &str) -> Option<ThemeJobState> {
        if self.succeeded.iter().any(|name| name == folder) {
            Some(ThemeJobState::ImagesWritten)
        } else if self.failures.iter().any(|failure| failure.folder == folder) {
            Some(ThemeJobState::Failed)
        } else {
            None
        }
    }
}

pub struct ThemePipeline {
    options: ThemeOptions,
}

impl ThemePipeline {
    pub fn new(options: ThemeOptions) -> Self {
        ThemePipeline { options }
    }

    pub fn options(&self) -> &ThemeOptions {
        &self.options
    }

    /// Package every theme in `catalog`
    ///
    /// Returns `Err` only for failures that stop the whole run: no CSS layers,
    /// gallery enumeration, or base theme copy. Nothing is written until the
    /// gallery has been enumerated. Per-theme failures land in the report.
    pub async fn run(&self, catalog: &dyn ThemeCatalog) -> Result<ThemeReport, ThemeError> {
        if self.options.css_layers.is_empty() {
            return Err(ThemeError::NoLayers);
        }

        let gallery = catalog.gallery().await?;
        ensure_unique_folders(gallery.iter().map(|theme| theme.folder_name()))?;

        let copied = self.copy_base().await?;
        debug!("Copied {} base theme files", copied);
        info!("Packaging {} themes", gallery.len());

        let mut jobs: FuturesUnordered<_> = gallery
            .into_iter()
            .map(|theme| self.run_job(theme))
            .collect();

        let mut report = ThemeReport::default();
        while let Some(outcome) = jobs.next().await {
            match outcome {
                Ok(folder) => {
                    debug!("Theme '{}' packaged", folder);
                    report.succeeded.push(folder);
                }
                Err(failure) => {
                    if report.failures.is_empty() {
                        error!("{}", failure);
                    } else {
                        warn!("{}", failure);
                    }
                    report.failures.push(failure);
                }
            }
        }

        report.succeeded.sort();
        report.failures.sort_by(|a, b| a.folder.cmp(&b.folder));
        info!(
            "Themes packaged: {} succeeded, {} failed",
            report.succeeded.len(),
            report.failures.len()
        );
        Ok(report)
    }

    /// Copy `<dist>/themes/base/**` into the target unchanged
    async fn copy_base(&self) -> Result<usize, ThemeError> {
        let source = self.options.dist_dir.join(BASE_THEME_DIR);
        if !source.is_dir() {
            warn!("No base theme at {:?}; skipping base copy", source);
            return Ok(0);
        }
        let target = self.options.target_dir.join(BASE_THEME_DIR);

        let files = list_files(&source)?;
        for (relative, path) in &files {
            let dest = target.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| ThemeError::io(parent, e))?;
            }
            fs::copy(path, &dest)
                .await
                .map_err(|e| ThemeError::io(&dest, e))?;
        }
        Ok(files.len())
    }

    async fn run_job(&self, theme: Box<dyn ThemeVariant>) -> Result<String, ThemeFailure> {
        let folder = theme.folder_name().to_string();
        let mut state = ThemeJobState::Pending;
        match self.package(theme.as_ref(), &folder, &mut state).await {
            Ok(()) => Ok(folder),
            Err(error) => Err(ThemeFailure {
                folder,
                last_state: state,
                error,
            }),
        }
    }

    async fn package(
        &self,
        theme: &dyn ThemeVariant,
        folder: &str,
        state: &mut ThemeJobState,
    ) -> Result<(), ThemeError> {
        if !is_folder_name(folder) {
            return Err(ThemeError::FolderName(folder.to_string()));
        }
        let theme_dir = self.options.target_dir.join("themes").join(folder);

        let css = theme.css().await?;
        let css_path = theme_dir.join(THEME_CSS_FILE);
        write_file(&css_path, css.as_bytes()).await?;
        *state = ThemeJobState::CssWritten;

        let layers = bundle_layers(&self.options.dist_dir, &self.options.css_layers, &css_path);
        concat_files(&layers, &theme_dir.join(BUNDLE_CSS_FILE)).await?;
        *state = ThemeJobState::BundleConcatenated;

        *state = ThemeJobState::ImagesRequested;
        let images = theme.fetch_images().await?;
        let images_dir = theme_dir.join("images");
        for image in &images {
            if !is_contained(&image.path) {
                return Err(ThemeError::AssetPath(image.path.clone()));
            }
            write_file(&images_dir.join(&image.path), &image.data).await?;
        }
        *state = ThemeJobState::ImagesWritten;
        debug!("Theme '{}': wrote {} images", folder, images.len());
        Ok(())
    }
}

/// Package `catalog` into `output_root` in one call
pub async fn package_themes(
    catalog: &dyn ThemeCatalog,
    css_layers: &[String],
    dist_dir: &Path,
    output_root: &Path,
) -> Result<ThemeReport, ThemeError> {
    ThemePipeline::new(ThemeOptions {
        dist_dir: dist_dir.to_path_buf(),
        target_dir: output_root.to_path_buf(),
        css_layers: css_layers.to_vec(),
    })
    .run(catalog)
    .await
}

/// A single plain path segment
fn is_folder_name(folder: &str) -> bool {
    is_contained(folder) && !folder.contains(['/', '\\'])
}

async fn write_file(path: &Path, data: &[u8]) -> Result<(), ThemeError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| ThemeError::io(parent, e))?;
    }
    fs::write(path, data)
        .await
        .map_err(|e| ThemeError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ImageAsset;
    use crate::local::LocalCatalog;
    use async_trait::async_trait;
    use std::fs as std_fs;
    use tempfile::TempDir;

    #[derive(Clone, Copy)]
    enum Fault {
        None,
        Css,
        Images,
    }

    struct StaticTheme {
        folder: String,
        css: String,
        images: Vec<ImageAsset>,
        fault: Fault,
    }

    #[async_trait]
    impl ThemeVariant for StaticTheme {
        fn folder_name(&self) -> &str {
            &self.folder
        }

        async fn css(&self) -> Result<String, ThemeError> {
            match self.fault {
                Fault::Css => Err(ThemeError::Catalog(format!("{}: css unavailable", self.folder))),
                _ => Ok(self.css.clone()),
            }
        }

        async fn fetch_images(&self) -> Result<Vec<ImageAsset>, ThemeError> {
            tokio::task::yield_now().await;
            match self.fault {
                Fault::Images => Err(ThemeError::Catalog(format!("{}: image fetch failed", self.folder))),
                _ => Ok(self.images.clone()),
            }
        }
    }

    fn theme(folder: &str, fault: Fault) -> StaticTheme {
        StaticTheme {
            folder: folder.to_string(),
            css: format!("/* {folder} */"),
            images: vec![ImageAsset::new("ui-icons_222222_256x240.png", b"png".to_vec())],
            fault,
        }
    }

    struct StaticCatalog {
        themes: Vec<(&'static str, Fault)>,
    }

    #[async_trait]
    impl ThemeCatalog for StaticCatalog {
        async fn gallery(&self) -> Result<Vec<Box<dyn ThemeVariant>>, ThemeError> {
            Ok(self
                .themes
                .iter()
                .map(|&(folder, fault)| Box::new(theme(folder, fault)) as Box<dyn ThemeVariant>)
                .collect())
        }
    }

    struct BrokenCatalog;

    #[async_trait]
    impl ThemeCatalog for BrokenCatalog {
        async fn gallery(&self) -> Result<Vec<Box<dyn ThemeVariant>>, ThemeError> {
            Err(ThemeError::Catalog("gallery offline".to_string()))
        }
    }

    fn release_tree(root: &Path) -> ThemeOptions {
        let dist = root.join("dist");
        let base = dist.join("themes").join("base");
        assert!(std_fs::create_dir_all(base.join("images")).is_ok());
        assert!(std_fs::write(base.join("jquery.ui.core.css"), ".ui-helper-hidden{}").is_ok());
        assert!(std_fs::write(base.join("jquery.ui.tabs.css"), ".ui-tabs{}").is_ok());
        assert!(std_fs::write(base.join(THEME_CSS_FILE), "/* base */").is_ok());
        assert!(std_fs::write(base.join("images").join("base.png"), "b").is_ok());

        ThemeOptions {
            dist_dir: dist,
            target_dir: root.join("themes-package"),
            css_layers: vec![
                "themes/base/jquery.ui.core.css".to_string(),
                "themes/base/jquery.ui.tabs.css".to_string(),
                "themes/base/jquery.ui.theme.css".to_string(),
            ],
        }
    }

    #[tokio::test]
    async fn test_one_failing_theme_does_not_stop_siblings() {
        let Ok(dir) = TempDir::new() else {
            return;
        };
        let options = release_tree(dir.path());
        let target = options.target_dir.clone();
        let catalog = StaticCatalog {
            themes: vec![("ui-lightness", Fault::None), ("ui-darkness", Fault::Images)],
        };

        let Ok(report) = ThemePipeline::new(options).run(&catalog).await else {
            panic!("run should complete");
        };

        assert!(!report.is_success());
        assert_eq!(report.succeeded, ["ui-lightness"]);
        assert_eq!(report.failures.len(), 1);
        let failure = &report.failures[0];
        assert_eq!(failure.folder, "ui-darkness");
        assert_eq!(failure.last_state, ThemeJobState::ImagesRequested);
        assert!(failure.to_string().contains("ui-darkness"));

        let lightness = target.join("themes").join("ui-lightness");
        assert!(lightness.join(BUNDLE_CSS_FILE).is_file());
        assert!(lightness.join("images").join("ui-icons_222222_256x240.png").is_file());
        assert_eq!(report.state_of("ui-lightness"), Some(ThemeJobState::ImagesWritten));
        assert_eq!(report.state_of("ui-darkness"), Some(ThemeJobState::Failed));
        assert_eq!(report.state_of("smoothness"), None);
    }

    #[tokio::test]
    async fn test_bundle_replaces_placeholder_layer() {
        let Ok(dir) = TempDir::new() else {
            return;
        };
        let options = release_tree(dir.path());
        let target = options.target_dir.clone();
        let catalog = StaticCatalog {
            themes: vec![("smoothness", Fault::None)],
        };

        let report = ThemePipeline::new(options).run(&catalog).await;
        assert!(report.is_ok_and(|r| r.is_success() && r.total() == 1));

        let theme_dir = target.join("themes").join("smoothness");
        assert!(std_fs::read_to_string(theme_dir.join(BUNDLE_CSS_FILE))
            .is_ok_and(|css| css == ".ui-helper-hidden{}\n.ui-tabs{}\n/* smoothness */"));
        assert!(std_fs::read_to_string(theme_dir.join(THEME_CSS_FILE))
            .is_ok_and(|css| css == "/* smoothness */"));
    }

    #[tokio::test]
    async fn test_base_theme_copied_unmodified() {
        let Ok(dir) = TempDir::new() else {
            return;
        };
        let options = release_tree(dir.path());
        let target = options.target_dir.join(BASE_THEME_DIR);
        let catalog = StaticCatalog { themes: Vec::new() };

        let report = ThemePipeline::new(options).run(&catalog).await;
        assert!(report.is_ok_and(|r| r.is_success() && r.total() == 0));
        assert!(std_fs::read_to_string(target.join(THEME_CSS_FILE)).is_ok_and(|css| css == "/* base */"));
        assert!(target.join("images").join("base.png").is_file());
    }

    #[tokio::test]
    async fn test_css_failure_recorded_before_any_output() {
        let Ok(dir) = TempDir::new() else {
            return;
        };
        let options = release_tree(dir.path());
        let target = options.target_dir.clone();
        let catalog = StaticCatalog {
            themes: vec![("black-tie", Fault::Css), ("cupertino", Fault::None)],
        };

        let Ok(report) = ThemePipeline::new(options).run(&catalog).await else {
            panic!("run should complete");
        };
        assert_eq!(report.succeeded, ["cupertino"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].last_state, ThemeJobState::Pending);
        assert!(!target.join("themes").join("black-tie").join(BUNDLE_CSS_FILE).exists());
    }

    #[tokio::test]
    async fn test_escaping_folder_name_fails_the_job() {
        let Ok(dir) = TempDir::new() else {
            return;
        };
        let options = release_tree(dir.path());
        let catalog = StaticCatalog {
            themes: vec![("../outside", Fault::None)],
        };

        let Ok(report) = ThemePipeline::new(options).run(&catalog).await else {
            panic!("run should complete");
        };
        assert!(matches!(report.failures[0].error, ThemeError::FolderName(_)));
        assert!(!dir.path().join("outside").exists());
    }

    #[tokio::test]
    async fn test_package_themes_shorthand() {
        let Ok(dir) = TempDir::new() else {
            return;
        };
        let options = release_tree(dir.path());
        let catalog = StaticCatalog {
            themes: vec![("redmond", Fault::None)],
        };
        let report = package_themes(
            &catalog,
            &options.css_layers,
            &options.dist_dir,
            &options.target_dir,
        )
        .await;
        assert!(report.is_ok_and(|r| r.succeeded == ["redmond"]));
        assert!(options.target_dir.join("themes/redmond").join(BUNDLE_CSS_FILE).is_file());
    }

    #[tokio::test]
    async fn test_gallery_failure_is_fatal() {
        let Ok(dir) = TempDir::new() else {
            return;
        };
        let options = release_tree(dir.path());
        let target = options.target_dir.clone();
        let result = ThemePipeline::new(options).run(&BrokenCatalog).await;
        assert!(matches!(result, Err(ThemeError::Catalog(_))));
        assert!(!target.exists());
    }

    #[tokio::test]
    async fn test_missing_gallery_writes_nothing() {
        let Ok(dir) = TempDir::new() else {
            return;
        };
        let options = release_tree(dir.path());
        let target = options.target_dir.clone();
        let catalog = LocalCatalog::new(dir.path().join("no-gallery"));

        let result = ThemePipeline::new(options).run(&catalog).await;
        assert!(matches!(result, Err(ThemeError::NotInstalled(_))));
        assert!(!target.join(BASE_THEME_DIR).exists());
        assert!(!target.exists());
    }

    #[tokio::test]
    async fn test_duplicate_folders_stop_the_run() {
        let Ok(dir) = TempDir::new() else {
            return;
        };
        let options = release_tree(dir.path());
        let target = options.target_dir.clone();
        let catalog = StaticCatalog {
            themes: vec![("redmond", Fault::None), ("redmond", Fault::None)],
        };

        let result = ThemePipeline::new(options).run(&catalog).await;
        assert!(matches!(result, Err(ThemeError::DuplicateFolder(folder)) if folder == "redmond"));
        assert!(!target.exists());
    }

    #[tokio::test]
    async fn test_empty_layer_list_is_rejected() {
        let Ok(dir) = TempDir::new() else {
            return;
        };
        let mut options = release_tree(dir.path());
        options.css_layers.clear();
        let result = ThemePipeline::new(options).run(&BrokenCatalog).await;
        assert!(matches!(result, Err(ThemeError::NoLayers)));
    }
}
