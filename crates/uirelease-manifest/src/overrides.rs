//! Per-plugin override records, grouped by category
//!
//! Each category has one JSON file, `<build>/<category>.json`, mapping plugin
//! identifiers to [`PluginOverride`] records. File order is preserved.

use crate::errors::ManifestError;
use crate::types::{Category, PluginOverride};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PluginOverrides {
    by_category: BTreeMap<Category, Vec<(String, PluginOverride)>>,
}

impl PluginOverrides {
    /// Path of the override file for `category` under `build_dir`
    pub fn file_path(build_dir: &Path, category: Category) -> PathBuf {
        build_dir.join(format!("{}.json", category.as_str()))
    }

    /// Load all category files. Any missing or malformed file aborts the load.
    pub fn load(build_dir: &Path) -> Result<Self, ManifestError> {
        let mut overrides = PluginOverrides::default();
        for category in Category::ALL {
            let path = Self::file_path(build_dir, category);
            let plugins = read_category_file(&path)?;
            debug!("Loaded {} plugin(s) for {}", plugins.len(), category);
            overrides.by_category.insert(category, plugins);
        }
        info!("Loaded {} plugin override records", overrides.len());
        Ok(overrides)
    }

    /// Add or replace a plugin's record
    pub fn insert(&mut self, category: Category, plugin: &str, data: PluginOverride) {
        let plugins = self.by_category.entry(category).or_default();
        if let Some(slot) = plugins.iter_mut().find(|(id, _)| id == plugin) {
            slot.1 = data;
        } else {
            plugins.push((plugin.to_string(), data));
        }
    }

    /// Plugins declared under `category`, in file order
    pub fn plugins(&self, category: Category) -> &[(String, PluginOverride)] {
        self.by_category
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.by_category.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn read_category_file(path: &Path) -> Result<Vec<(String, PluginOverride)>, ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let records: Map<String, Value> =
        serde_json::from_str(&content).map_err(|source| ManifestError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

    records
        .into_iter()
        .map(|(plugin, value)| {
            serde_json::from_value::<PluginOverride>(value)
                .map(|data| (plugin.clone(), data))
                .map_err(|source| ManifestError::InvalidPlugin {
                    path: path.to_path_buf(),
                    plugin,
                    source,
                })
        })
        .collect()
}
