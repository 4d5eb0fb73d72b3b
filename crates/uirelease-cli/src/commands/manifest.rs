use super::load_release;
use crate::GlobalOpts;
use anyhow::Context;
use std::path::Path;
use uirelease_logger as logger;
use uirelease_manifest::{write_descriptors, CategoryDefaults, PluginOverrides, ReleaseContext};

/// Generate one descriptor file per plugin
pub fn handle_manifest(_opts: &GlobalOpts) -> anyhow::Result<()> {
    let (config, metadata) = load_release()?;

    let defaults = match &config.manifest.defaults {
        Some(path) => CategoryDefaults::load_from_path(Path::new(path))?,
        None => CategoryDefaults::builtin(),
    };
    let overrides = PluginOverrides::load(Path::new(&config.paths.build))
        .context("Failed to load plugin override files")?;

    let context = ReleaseContext::new(metadata)
        .with_defaults(defaults)
        .with_settings(config.manifest.settings.clone());
    let descriptors = context.generator().generate(&overrides);

    let out_dir = Path::new(&config.paths.manifests);
    let written = write_descriptors(&descriptors, out_dir, &context.settings.descriptor_suffix)?;
    logger::success(&format!(
        "Generated {} descriptors for {} {}",
        written.len(),
        context.settings.keyword_tag,
        context.metadata.version
    ));
    Ok(())
}
