//! Descriptor generation
//!
//! Merges category defaults, package metadata and per-plugin overrides into
//! one [`Descriptor`] per plugin. Generation is synchronous and pure: identical
//! inputs always produce identical descriptors.
//!
//! Every dependency is pinned to the current package version.

use crate::defaults::CategoryDefaults;
use crate::overrides::PluginOverrides;
use crate::template::PluginName;
use crate::types::{
    Category, DependencyMap, Descriptor, ManifestSettings, PackageMetadata, PluginOverride,
};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

/// Shared input of a run, built once and passed explicitly
#[derive(Debug, Clone)]
pub struct ReleaseContext {
    pub metadata: PackageMetadata,
    pub defaults: CategoryDefaults,
    pub settings: ManifestSettings,
}

impl ReleaseContext {
    pub fn new(metadata: PackageMetadata) -> Self {
        ReleaseContext {
            metadata,
            defaults: CategoryDefaults::builtin(),
            settings: ManifestSettings::default(),
        }
    }

    pub fn with_defaults(mut self, defaults: CategoryDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_settings(mut self, settings: ManifestSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn generator(&self) -> ManifestGenerator<'_> {
        ManifestGenerator::new(&self.defaults, &self.metadata, &self.settings)
    }
}

pub struct ManifestGenerator<'a> {
    defaults: &'a CategoryDefaults,
    metadata: &'a PackageMetadata,
    settings: &'a ManifestSettings,
}

impl<'a> ManifestGenerator<'a> {
    pub fn new(
        defaults: &'a CategoryDefaults,
        metadata: &'a PackageMetadata,
        settings: &'a ManifestSettings,
    ) -> Self {
        ManifestGenerator {
            defaults,
            metadata,
            settings,
        }
    }

    /// Resolve every plugin of every category, categories in fixed order
    pub fn generate(&self, overrides: &PluginOverrides) -> Vec<Descriptor> {
        let mut descriptors = Vec::with_capacity(overrides.len());
        for category in Category::ALL {
            for (plugin, data) in overrides.plugins(category) {
                let descriptor = self.resolve(category, plugin, data);
                debug!(
                    "Resolved {} ({} dependencies)",
                    descriptor.name,
                    descriptor.dependencies.len()
                );
                descriptors.push(descriptor);
            }
        }
        info!("Generated {} descriptors", descriptors.len());
        descriptors
    }

    /// Resolve a single plugin. Field precedence: non-empty override, then the
    /// substituted category template, then the substituted fallback pattern.
    pub fn resolve(&self, category: Category, plugin: &str, data: &PluginOverride) -> Descriptor {
        let base = self.defaults.get(category);
        let settings = self.settings;
        let names = PluginName::new(plugin);

        let field = |value: &Option<String>, template: &str| {
            explicit(value).map_or_else(|| names.substitute(template), str::to_string)
        };
        let url = |value: &Option<String>, template: &Option<String>, fallback: &str| {
            field(value, template.as_deref().unwrap_or(fallback))
        };

        let keywords = [settings.keyword_tag.as_str(), plugin]
            .into_iter()
            .chain(base.keywords.iter().map(String::as_str))
            .chain(data.keywords.iter().map(String::as_str))
            .map(str::to_string)
            .collect();

        let mut dependencies = DependencyMap::default();
        dependencies.insert(settings.framework.as_str(), settings.framework_constraint());
        for dependency in base.dependencies.iter().chain(data.dependencies.iter()) {
            dependencies.insert(
                format!("{}{}", settings.dependency_prefix, dependency),
                self.metadata.version.as_str(),
            );
        }

        Descriptor {
            name: field(&data.name, &base.name),
            title: field(&data.title, &base.title),
            description: data.description.clone(),
            keywords,
            version: self.metadata.version.clone(),
            author: self.metadata.author.clone(),
            maintainers: self.metadata.maintainers.clone(),
            licenses: self.metadata.licenses.clone(),
            bugs: self.metadata.bugs.clone(),
            homepage: url(&data.homepage, &base.homepage, &settings.homepage_fallback),
            demo: url(&data.demo, &base.demo, &settings.demo_fallback),
            docs: url(&data.docs, &base.docs, &settings.docs_fallback),
            download: settings.download_url.clone(),
            dependencies,
            category: explicit(&data.category).unwrap_or(category.as_str()).to_string(),
            extra: passthrough(plugin, &data.extra),
        }
    }
}

/// Override keys copied verbatim, minus any that would shadow a descriptor field
fn passthrough(plugin: &str, extra: &Map<String, Value>) -> Map<String, Value> {
    extra
        .iter()
        .filter(|(key, _)| {
            let reserved = Descriptor::is_field(key);
            if reserved {
                warn!("Plugin '{}': ignoring override key '{}'", plugin, key);
            }
            !reserved
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Generate with the default [`ManifestSettings`]
pub fn generate(
    defaults: &CategoryDefaults,
    overrides: &PluginOverrides,
    metadata: &PackageMetadata,
) -> Vec<Descriptor> {
    let settings = ManifestSettings::default();
    ManifestGenerator::new(defaults, metadata, &settings).generate(overrides)
}

/// Empty override values count as absent
fn explicit(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
