//! CSS layer concatenation

use crate::errors::ThemeError;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Separator placed between concatenated files
pub const SEPARATOR: &str = "\n";

/// Bundle layer list: every base layer but the last (the placeholder theme
/// layer), followed by the theme's own CSS file.
pub fn bundle_layers(release_dir: &Path, css_layers: &[String], theme_css: &Path) -> Vec<PathBuf> {
    let kept = css_layers.len().saturating_sub(1);
    css_layers[..kept]
        .iter()
        .map(|layer| release_dir.join(layer))
        .chain(std::iter::once(theme_css.to_path_buf()))
        .collect()
}

/// Concatenate `sources` in order into `dest`
pub async fn concat_files(sources: &[PathBuf], dest: &Path) -> Result<usize, ThemeError> {
    let mut parts = Vec::with_capacity(sources.len());
    for source in sources {
        let text = fs::read_to_string(source)
            .await
            .map_err(|e| ThemeError::io(source, e))?;
        parts.push(text);
    }
    let bundle = parts.join(SEPARATOR);

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| ThemeError::io(parent, e))?;
    }
    fs::write(dest, bundle.as_bytes())
        .await
        .map_err(|e| ThemeError::io(dest, e))?;
    Ok(bundle.len())
}
