//! Data model for descriptor generation
//!
//! Inputs are read once per run and never mutated: package metadata from
//! `package.json`, the category table, and the per-plugin override records.
//! [`Descriptor`] is the only output type.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use smallvec::SmallVec;
use std::fmt;

// =============================================================================
// PACKAGE METADATA - Shared by every descriptor of a release
// =============================================================================

/// Person entry (`author`, `maintainers`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// License entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct License {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Bug tracker reference, either a bare URL or an object
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Bugs {
    Url(String),
    Tracker {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        email: Option<String>,
    },
}

/// Global package metadata, immutable for the run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackageMetadata {
    pub version: String,
    #[serde(default)]
    pub author: Option<Person>,
    #[serde(default)]
    pub licenses: Vec<License>,
    #[serde(default)]
    pub bugs: Option<Bugs>,
    #[serde(default)]
    pub maintainers: Vec<Person>,
}

// =============================================================================
// CATEGORY
// =============================================================================

/// Component category, determining the default descriptor shape
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Core,
    Widget,
    Interaction,
    Effect,
}

impl Category {
    /// Fixed processing order
    pub const ALL: [Category; 4] = [
        Category::Core,
        Category::Widget,
        Category::Interaction,
        Category::Effect,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Core => "core",
            Category::Widget => "widget",
            Category::Interaction => "interaction",
            Category::Effect => "effect",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Base descriptor shape for one category. Templates may contain `{plugin}`
/// and `{Plugin}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryDefault {
    pub name: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "SmallVec::is_empty")]
    pub keywords: SmallVec<[String; 4]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,
    /// Category names, not plugin names
    #[serde(default, skip_serializing_if = "SmallVec::is_empty")]
    pub dependencies: SmallVec<[String; 4]>,
}

// =============================================================================
// PLUGIN OVERRIDE - Partial record, absent fields fall back to the category
// =============================================================================

/// Per-plugin override record from `<build>/<category>.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PluginOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    /// Explicit category reassignment, output only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Unknown keys, passed through into the descriptor verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// =============================================================================
// DESCRIPTOR - Output
// =============================================================================

/// Ordered dependency map: package name -> version requirement
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct DependencyMap(Map<String, Value>);

impl DependencyMap {
    /// Insert or overwrite; an overwritten entry keeps its position
    pub fn insert(&mut self, name: impl Into<String>, requirement: impl Into<String>) {
        self.0.insert(name.into(), Value::String(requirement.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter_map(|(name, value)| value.as_str().map(|v| (name.as_str(), v)))
    }
}

/// Fully resolved, publishable metadata record for one plugin
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Descriptor {
    pub name: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub keywords: Vec<String>,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Person>,
    pub maintainers: Vec<Person>,
    pub licenses: Vec<License>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bugs: Option<Bugs>,
    pub homepage: String,
    pub demo: String,
    pub docs: String,
    pub download: String,
    pub dependencies: DependencyMap,
    pub category: String,
    /// Passthrough keys; never one of [`Descriptor::FIELDS`]
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Descriptor {
    /// Keys owned by the descriptor itself, in output order
    pub const FIELDS: [&'static str; 15] = [
        "name",
        "title",
        "description",
        "keywords",
        "version",
        "author",
        "maintainers",
        "licenses",
        "bugs",
        "homepage",
        "demo",
        "docs",
        "download",
        "dependencies",
        "category",
    ];

    pub fn is_field(key: &str) -> bool {
        Descriptor::FIELDS.contains(&key)
    }
}

// =============================================================================
// SETTINGS - Conventions shared by every descriptor
// =============================================================================

/// Naming and URL conventions applied to every descriptor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ManifestSettings {
    /// First keyword of every descriptor
    pub keyword_tag: String,
    /// Prefix turning a category name into a package name
    pub dependency_prefix: String,
    pub framework: String,
    /// Minimum framework version, rendered as `>=<floor>`
    pub framework_floor: String,
    pub download_url: String,
    pub homepage_fallback: String,
    pub demo_fallback: String,
    pub docs_fallback: String,
    pub descriptor_suffix: String,
}

impl Default for ManifestSettings {
    fn default() -> Self {
        ManifestSettings {
            keyword_tag: "ui".to_string(),
            dependency_prefix: "ui.".to_string(),
            framework: "jquery".to_string(),
            framework_floor: "1.6".to_string(),
            download_url: "http://jqueryui.com/download/".to_string(),
            homepage_fallback: "http://jqueryui.com/{plugin}/".to_string(),
            demo_fallback: "http://jqueryui.com/{plugin}/".to_string(),
            docs_fallback: "http://api.jqueryui.com/{plugin}/".to_string(),
            descriptor_suffix: ".jquery.json".to_string(),
        }
    }
}

impl ManifestSettings {
    pub fn framework_constraint(&self) -> String {
        format!(">={}", self.framework_floor)
    }
}
