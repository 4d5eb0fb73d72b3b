//! md5 hash lists for CDN uploads

use crate::errors::CliError;
use md5::{Digest, Md5};
use std::fs;
use std::path::Path;
use tracing::info;
use walkdir::WalkDir;

/// Write `<relative path> <md5 hex>` for every file under `source_dir`
///
/// An existing `dest` is removed first so the list never contains itself.
/// Returns the number of hashed files.
pub fn write_hash_manifest(dest: &Path, source_dir: &Path) -> Result<usize, CliError> {
    if dest.exists() {
        fs::remove_file(dest).map_err(|e| CliError::io(dest, e))?;
    }
    if !source_dir.is_dir() {
        return Err(CliError::MissingSource(source_dir.to_path_buf()));
    }

    let mut lines = Vec::new();
    for entry in WalkDir::new(source_dir) {
        let entry = entry.map_err(|e| {
            let path = e.path().map_or_else(|| source_dir.to_path_buf(), Path::to_path_buf);
            CliError::io(path, std::io::Error::other(e.to_string()))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(source_dir) else {
            continue;
        };
        let data = fs::read(entry.path()).map_err(|e| CliError::io(entry.path(), e))?;
        lines.push(format!(
            "{} {}",
            relative.to_string_lossy().replace('\\', "/"),
            hex::encode(Md5::digest(&data))
        ));
    }
    lines.sort();

    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| CliError::io(parent, e))?;
    }
    let mut content = lines.join("\n");
    content.push('\n');
    fs::write(dest, content).map_err(|e| CliError::io(dest, e))?;

    info!("Wrote {:?} with {} hashes", dest, lines.len());
    Ok(lines.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_hash_list_sorted_relative() {
        let Ok(dir) = TempDir::new() else {
            return;
        };
        let cdn = dir.path().join("cdn");
        assert!(fs::create_dir_all(cdn.join("themes")).is_ok());
        assert!(fs::write(cdn.join("jquery-ui.js"), "").is_ok());
        assert!(fs::write(cdn.join("themes").join("a.css"), "abc").is_ok());

        let dest = dir.path().join("MANIFEST");
        assert!(write_hash_manifest(&dest, &cdn).is_ok_and(|n| n == 2));
        assert!(fs::read_to_string(&dest).is_ok_and(|s| s
            == "jquery-ui.js d41d8cd98f00b204e9800998ecf8427e\n\
                themes/a.css 900150983cd24fb0d6963f7d28e17f72\n"));
    }

    #[test]
    fn test_manifest_inside_source_never_lists_itself() {
        let Ok(dir) = TempDir::new() else {
            return;
        };
        let cdn = dir.path();
        assert!(fs::write(cdn.join("jquery-ui.min.js"), "x").is_ok());
        let dest = cdn.join("MANIFEST");
        assert!(fs::write(&dest, "stale").is_ok());

        assert!(write_hash_manifest(&dest, cdn).is_ok_and(|n| n == 1));
        assert!(fs::read_to_string(&dest).is_ok_and(|s| !s.contains("MANIFEST") && s.lines().count() == 1));

        // Re-running gives the same list
        let Ok(first) = fs::read_to_string(&dest) else {
            return;
        };
        assert!(write_hash_manifest(&dest, cdn).is_ok());
        assert!(fs::read_to_string(&dest).is_ok_and(|s| s == first));
    }
}
