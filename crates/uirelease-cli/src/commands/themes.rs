use super::load_release;
use crate::errors::CliError;
use crate::GlobalOpts;
use anyhow::Context;
use uirelease_logger as logger;
use uirelease_themes::{open_catalog, ThemeError, ThemeOptions, ThemePipeline};

/// Package every gallery theme next to the release tree
pub async fn handle_themes(gallery: Option<String>, _opts: &GlobalOpts) -> anyhow::Result<()> {
    let (config, metadata) = load_release()?;

    let location = gallery.or(config.themes.gallery.clone()).ok_or_else(|| {
        ThemeError::NotInstalled(
            "no theme gallery configured; set [themes] gallery in uirelease.toml or pass --gallery"
                .to_string(),
        )
    })?;
    let catalog = open_catalog(&location)?;

    let options = ThemeOptions {
        dist_dir: config.release_dir(&metadata.version),
        target_dir: config.themes_dir(&metadata.version),
        css_layers: config.css.layers.clone(),
    };
    let target = options.target_dir.clone();
    let pipeline = ThemePipeline::new(options);

    logger::spinner_start(&format!("Packaging themes from {location}"));
    let report = match pipeline.run(catalog.as_ref()).await {
        Ok(report) => report,
        Err(e) => {
            logger::spinner_stop();
            return Err(e).context("Theme packaging aborted");
        }
    };

    if report.is_success() {
        logger::spinner_success(&format!(
            "Packaged {} themes into {}",
            report.succeeded.len(),
            target.display()
        ));
        return Ok(());
    }

    logger::spinner_error(&format!(
        "{} of {} themes failed",
        report.failures.len(),
        report.total()
    ));
    for failure in &report.failures {
        logger::warn(&failure.to_string());
    }
    Err(CliError::ThemeFailures(report.failures.len()).into())
}
