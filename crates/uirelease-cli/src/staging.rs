//! Release staging: copy sources into the release tree with version stamping
//!
//! Text files matching the processing pattern have every `@VERSION` replaced
//! by the package version; everything else is copied byte-for-byte.

use crate::errors::CliError;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uirelease_config::{expand_version, CopyTask};
use walkdir::WalkDir;

/// Placeholder replaced by the package version
pub const VERSION_PLACEHOLDER: &str = "@VERSION";

/// Files whose path matches this pattern get version substitution
pub const PROCESS_PATTERN: &str = "(js|css)$";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyReport {
    pub copied: usize,
    pub renamed: usize,
}

/// The default processing pattern
pub fn process_pattern() -> Result<Regex, regex::Error> {
    Regex::new(PROCESS_PATTERN)
}

/// Run one copy task
pub fn copy_with_substitution(
    task: &CopyTask,
    version: &str,
    pattern: &Regex,
) -> Result<CopyReport, CliError> {
    let dest = PathBuf::from(expand_version(&task.dest, version));
    let strip = task.strip.as_deref().map(|s| expand_version(s, version));

    let mut report = CopyReport::default();
    for source in &task.sources {
        for file in expand_source(Path::new(source))? {
            let target = match &strip {
                Some(prefix) => file.strip_prefix(prefix.as_str()).unwrap_or(file.as_str()),
                None => file.as_str(),
            };
            let target = dest.join(target.trim_start_matches('/'));
            copy_file(Path::new(&file), &target, version, pattern)?;
            report.copied += 1;
        }
    }
    info!("{}: copied {} files to {:?}", task.name, report.copied, dest);

    for rename in &task.renames {
        let to = expand_version(&rename.to, version);
        let target = dest.join(to.trim_start_matches('/'));
        copy_file(Path::new(&rename.from), &target, version, pattern)?;
        report.renamed += 1;
    }
    if report.renamed > 0 {
        info!("{}: renamed {} files", task.name, report.renamed);
    }
    Ok(report)
}

/// Files under `source` as '/'-separated paths, sorted
fn expand_source(source: &Path) -> Result<Vec<String>, CliError> {
    if source.is_file() {
        return Ok(vec![slash_path(source)]);
    }
    if !source.is_dir() {
        return Err(CliError::MissingSource(source.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(source) {
        let entry = entry.map_err(|e| {
            let path = e.path().map_or_else(|| source.to_path_buf(), Path::to_path_buf);
            CliError::io(path, std::io::Error::other(e.to_string()))
        })?;
        if entry.file_type().is_file() {
            files.push(slash_path(entry.path()));
        }
    }
    files.sort();
    Ok(files)
}

fn slash_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Copy one file, stamping the version when `src` matches `pattern`
pub fn copy_file(src: &Path, dest: &Path, version: &str, pattern: &Regex) -> Result<(), CliError> {
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| CliError::io(parent, e))?;
    }

    if pattern.is_match(&slash_path(src)) {
        let content = fs::read_to_string(src).map_err(|e| CliError::io(src, e))?;
        fs::write(dest, content.replace(VERSION_PLACEHOLDER, version))
            .map_err(|e| CliError::io(dest, e))?;
    } else {
        fs::copy(src, dest).map_err(|e| CliError::io(src, e))?;
    }
    debug!("Copied {:?} -> {:?}", src, dest);
    Ok(())
}
