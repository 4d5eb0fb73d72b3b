//! Plugin descriptor generation
//!
//! Derives one publishable descriptor per plugin from three inputs: the
//! package metadata, the category default table, and per-plugin override
//! records. See [`generator`] for the merge rules and [`manifest_writer`] for
//! the on-disk format.

pub mod defaults;
pub mod errors;
pub mod generator;
pub mod manifest_writer;
pub mod overrides;
pub mod template;
pub mod types;

pub use defaults::CategoryDefaults;
pub use errors::ManifestError;
pub use generator::{generate, ManifestGenerator, ReleaseContext};
pub use manifest_writer::{
    read_descriptor, read_package_metadata, to_json_string, write_descriptor, write_descriptors,
};
pub use overrides::PluginOverrides;
pub use template::{capitalize, substitute, PluginName};
pub use types::{
    Bugs, Category, CategoryDefault, DependencyMap, Descriptor, License, ManifestSettings,
    PackageMetadata, Person, PluginOverride,
};
