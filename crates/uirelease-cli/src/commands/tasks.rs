//! Named staging tasks from `uirelease.toml`: `[[copy]]`, `[[zip]]`, `[[md5]]`

use super::load_release;
use crate::archive::create_archive;
use crate::errors::CliError;
use crate::hashes::write_hash_manifest;
use crate::staging::{copy_with_substitution, process_pattern};
use crate::GlobalOpts;
use anyhow::Context;
use std::path::Path;
use uirelease_config::{expand_version, CopyTask, HashTask, ZipTask};
use uirelease_logger as logger;

trait NamedTask {
    const KIND: &'static str;
    fn name(&self) -> &str;
}

impl NamedTask for CopyTask {
    const KIND: &'static str = "copy";
    fn name(&self) -> &str {
        &self.name
    }
}

impl NamedTask for ZipTask {
    const KIND: &'static str = "zip";
    fn name(&self) -> &str {
        &self.name
    }
}

impl NamedTask for HashTask {
    const KIND: &'static str = "md5";
    fn name(&self) -> &str {
        &self.name
    }
}

/// All tasks, or only the one called `name`
fn select<'a, T: NamedTask>(tasks: &'a [T], name: Option<&str>) -> Result<Vec<&'a T>, CliError> {
    match name {
        None => Ok(tasks.iter().collect()),
        Some(name) => tasks
            .iter()
            .find(|task| task.name() == name)
            .map(|task| vec![task])
            .ok_or_else(|| CliError::UnknownTask {
                kind: T::KIND,
                name: name.to_string(),
            }),
    }
}

pub fn handle_copy(task: Option<&str>, _opts: &GlobalOpts) -> anyhow::Result<()> {
    let (config, metadata) = load_release()?;
    let pattern = process_pattern()?;

    let selected = select(&config.copy, task)?;
    if selected.is_empty() {
        logger::warn("No [[copy]] tasks configured");
    }
    for task in selected {
        logger::step(&format!("copy:{}", task.name));
        let report = copy_with_substitution(task, &metadata.version, &pattern)
            .with_context(|| format!("Copy task '{}' failed", task.name))?;
        logger::success(&format!(
            "{}: copied {} files, renamed {}",
            task.name, report.copied, report.renamed
        ));
    }
    Ok(())
}

pub async fn handle_zip(task: Option<&str>, _opts: &GlobalOpts) -> anyhow::Result<()> {
    let (config, metadata) = load_release()?;

    let selected = select(&config.zip, task)?;
    if selected.is_empty() {
        logger::warn("No [[zip]] tasks configured");
    }
    for task in selected {
        let dest = expand_version(&task.dest, &metadata.version);
        let src = expand_version(&task.src, &metadata.version);
        let cwd = expand_version(&task.cwd, &metadata.version);

        logger::spinner_start(&format!("Zipping {dest}"));
        match create_archive(&dest, &src, Path::new(&cwd)).await {
            Ok(()) => logger::spinner_success(&format!("Zipped {dest}")),
            Err(e) => {
                logger::spinner_stop();
                return Err(e).with_context(|| format!("Zip task '{}' failed", task.name));
            }
        }
    }
    Ok(())
}

pub fn handle_md5(task: Option<&str>, _opts: &GlobalOpts) -> anyhow::Result<()> {
    let (config, metadata) = load_release()?;

    let selected = select(&config.md5, task)?;
    if selected.is_empty() {
        logger::warn("No [[md5]] tasks configured");
    }
    for task in selected {
        let dest = expand_version(&task.dest, &metadata.version);
        let src = expand_version(&task.src, &metadata.version);
        let count = write_hash_manifest(Path::new(&dest), Path::new(&src))
            .with_context(|| format!("md5 task '{}' failed", task.name))?;
        logger::success(&format!("Wrote {dest} with {count} hashes"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash_task(name: &str) -> HashTask {
        HashTask {
            name: name.to_string(),
            src: "dist/cdn".to_string(),
            dest: "dist/MANIFEST".to_string(),
        }
    }

    #[test]
    fn test_select_all_or_named() {
        let tasks = vec![hash_task("cdn"), hash_task("googlecdn")];
        assert!(select(&tasks, None).is_ok_and(|t| t.len() == 2));
        assert!(select(&tasks, Some("googlecdn")).is_ok_and(|t| t.len() == 1 && t[0].name == "googlecdn"));
    }

    #[test]
    fn test_select_unknown_names_kind() {
        let tasks = vec![hash_task("cdn")];
        let result = select(&tasks, Some("release"));
        assert!(result.is_err_and(|e| e.to_string() == "No md5 task named 'release'"));
    }
}
