//! Descriptor serialization and output
//!
//! Descriptors are written as tab-indented JSON with a trailing newline, one
//! file per plugin named `<descriptor name><suffix>`. Key order is fixed by the
//! [`Descriptor`] field order, so identical inputs give byte-identical files.

use crate::errors::ManifestError;
use crate::types::{Descriptor, PackageMetadata};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

/// Render a descriptor exactly as it is written to disk
pub fn to_json_string(descriptor: &Descriptor) -> Result<String, ManifestError> {
    let mut buffer = Vec::with_capacity(1024);
    let mut serializer = Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"\t"));
    descriptor.serialize(&mut serializer)?;
    buffer.push(b'\n');
    String::from_utf8(buffer)
        .map_err(|e| ManifestError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// File name for a descriptor, e.g. `ui.tabs.jquery.json`
///
/// Fails unless the name is a single plain path segment.
pub fn descriptor_file_name(descriptor: &Descriptor, suffix: &str) -> Result<String, ManifestError> {
    if !is_file_name(&descriptor.name) {
        return Err(ManifestError::InvalidName(descriptor.name.clone()));
    }
    Ok(format!("{}{}", descriptor.name, suffix))
}

fn is_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    !name.contains(['/', '\\'])
        && matches!(components.next(), Some(Component::Normal(_)))
        && components.next().is_none()
}

/// Write one descriptor with an atomic temp-file rename
pub fn write_descriptor(
    descriptor: &Descriptor,
    out_dir: &Path,
    suffix: &str,
) -> Result<PathBuf, ManifestError> {
    let path = out_dir.join(descriptor_file_name(descriptor, suffix)?);
    let content = to_json_string(descriptor)?;

    let temp_path = path.with_extension("json.tmp");
    {
        let file = fs::File::create(&temp_path)?;
        let mut writer = std::io::BufWriter::new(file);
        writer.write_all(content.as_bytes())?;
        writer.flush()?;
    }
    fs::rename(&temp_path, &path)?;

    debug!("Wrote {:?}", path);
    Ok(path)
}

/// Write every descriptor under `out_dir`
pub fn write_descriptors(
    descriptors: &[Descriptor],
    out_dir: &Path,
    suffix: &str,
) -> Result<Vec<PathBuf>, ManifestError> {
    for descriptor in descriptors {
        descriptor_file_name(descriptor, suffix)?;
    }
    fs::create_dir_all(out_dir)?;
    let written = descriptors
        .iter()
        .map(|descriptor| write_descriptor(descriptor, out_dir, suffix))
        .collect::<Result<Vec<_>, _>>()?;
    info!("Wrote {} descriptor files to {:?}", written.len(), out_dir);
    Ok(written)
}

/// Read a descriptor back (verification and tests)
pub fn read_descriptor(path: &Path) -> Result<Descriptor, ManifestError> {
    let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ManifestError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Load `package.json`
pub fn read_package_metadata(path: &Path) -> Result<PackageMetadata, ManifestError> {
    debug!("Reading package metadata from {:?}", path);
    let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ManifestError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}
