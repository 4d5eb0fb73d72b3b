//! Release configuration for the ui-release pipeline
//!
//! The configuration lives in `uirelease.toml` next to the library checkout.
//! Every section is optional; missing values fall back to the layout the
//! jQuery UI release has always used.

pub mod tasks;
pub mod tools;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub use tasks::{CopyTask, HashTask, Rename, ZipTask};
pub use tools::require_tool;
pub use uirelease_manifest::ManifestSettings;

/// Default file name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "uirelease.toml";

/// Environment variable overriding the config file location
pub const CONFIG_ENV_VAR: &str = "UIREL_CONFIG";

/// Token expanded to the package version in path templates
pub const VERSION_TOKEN: &str = "{version}";

/// Errors raised while loading or saving the release configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Reading or writing the config file failed
    Io(PathBuf, std::io::Error),
    /// The config file is not valid TOML for [`ReleaseConfig`]
    Parse(PathBuf, toml::de::Error),
    /// The config could not be rendered back to TOML
    Serialize(toml::ser::Error),
    /// A required executable is not on PATH
    ToolNotFound { tool: String, hint: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(path, err) => write!(f, "{}: {}", path.display(), err),
            ConfigError::Parse(path, err) => {
                write!(f, "Invalid configuration in {}: {}", path.display(), err)
            }
            ConfigError::Serialize(err) => write!(f, "Failed to serialize configuration: {}", err),
            ConfigError::ToolNotFound { tool, hint } => {
                write!(f, "Required tool '{}' not found on PATH. {}", tool, hint)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Top-level `uirelease.toml`
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ReleaseConfig {
    #[serde(default)]
    pub package: PackageSection,
    #[serde(default)]
    pub paths: PathsSection,
    #[serde(default)]
    pub manifest: ManifestSection,
    #[serde(default)]
    pub css: CssSection,
    #[serde(default)]
    pub themes: ThemesSection,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub copy: Vec<CopyTask>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub zip: Vec<ZipTask>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub md5: Vec<HashTask>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PackageSection {
    /// Path to the library's `package.json`
    pub metadata: String,
}

impl Default for PackageSection {
    fn default() -> Self {
        PackageSection {
            metadata: "package.json".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PathsSection {
    /// Directory holding `<category>.json` override files
    pub build: String,
    /// Release output root
    pub dist: String,
    /// Name of the built release tree inside `dist`
    pub dist_name: String,
    /// Name of the themes bundle inside `dist`
    pub themes_name: String,
    /// Where descriptor files are written
    pub manifests: String,
}

impl Default for PathsSection {
    fn default() -> Self {
        PathsSection {
            build: "build".to_string(),
            dist: "dist".to_string(),
            dist_name: "jquery-ui-{version}".to_string(),
            themes_name: "jquery-ui-themes-{version}".to_string(),
            manifests: ".".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ManifestSection {
    /// Optional TOML file replacing the built-in category table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<String>,
    #[serde(flatten)]
    pub settings: ManifestSettings,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CssSection {
    /// Ordered CSS layers of the base theme, relative to the release tree.
    /// The last entry is the placeholder theme layer swapped per theme.
    pub layers: Vec<String>,
}

const BASE_CSS_COMPONENTS: &[&str] = &[
    "core",
    "accordion",
    "autocomplete",
    "button",
    "datepicker",
    "dialog",
    "menu",
    "progressbar",
    "resizable",
    "selectable",
    "slider",
    "spinner",
    "tabs",
    "tooltip",
    "theme",
];

impl Default for CssSection {
    fn default() -> Self {
        CssSection {
            layers: BASE_CSS_COMPONENTS
                .iter()
                .map(|component| format!("themes/base/jquery.ui.{component}.css"))
                .collect(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ThemesSection {
    /// Theme gallery: a local directory or an http(s) URL to a gallery index
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gallery: Option<String>,
}

impl ReleaseConfig {
    /// Resolve the config file path, honoring `UIREL_CONFIG`
    pub fn path() -> PathBuf {
        if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
            let trimmed = env_path.trim();
            if !trimmed.is_empty() {
                return PathBuf::from(trimmed);
            }
        }
        PathBuf::from(CONFIG_FILE_NAME)
    }

    /// Load from the default location, returning defaults if the file doesn't exist
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path(&Self::path())
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(ReleaseConfig::default());
        }
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io(parent.to_path_buf(), e))?;
        }
        fs::write(path, self.to_toml_string()?).map_err(|e| ConfigError::Io(path.to_path_buf(), e))
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// `<dist>/<dist_name>` for the given version
    pub fn release_dir(&self, version: &str) -> PathBuf {
        Path::new(&self.paths.dist).join(expand_version(&self.paths.dist_name, version))
    }

    /// `<dist>/<themes_name>` for the given version
    pub fn themes_dir(&self, version: &str) -> PathBuf {
        Path::new(&self.paths.dist).join(expand_version(&self.paths.themes_name, version))
    }
}

/// Expand `{version}` in a path or file name template
pub fn expand_version(template: &str, version: &str) -> String {
    template.replace(VERSION_TOKEN, version)
}
