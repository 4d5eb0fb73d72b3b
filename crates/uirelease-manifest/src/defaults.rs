//! Category default table
//!
//! Every category must be present; a table file missing one is rejected at
//! load time rather than producing a partial descriptor set.

use crate::errors::ManifestError;
use crate::types::{Category, CategoryDefault};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryDefaults {
    pub core: CategoryDefault,
    pub widget: CategoryDefault,
    pub interaction: CategoryDefault,
    pub effect: CategoryDefault,
}

impl CategoryDefaults {
    /// The table every jQuery UI release has shipped with
    pub fn builtin() -> Self {
        CategoryDefaults {
            core: base("ui.{plugin}", "jQuery UI {Plugin}", &[]),
            widget: base("ui.{plugin}", "jQuery UI {Plugin}", &["core", "widget"]),
            interaction: base(
                "ui.{plugin}",
                "jQuery UI {Plugin}",
                &["core", "widget", "mouse"],
            ),
            effect: CategoryDefault {
                keywords: strings(&["effect", "show", "hide"]),
                homepage: Some("http://jqueryui.com/{plugin}-effect/".to_string()),
                demo: Some("http://jqueryui.com/{plugin}-effect/".to_string()),
                docs: Some("http://api.jqueryui.com/{plugin}-effect/".to_string()),
                ..base("ui.effect-{plugin}", "jQuery UI {Plugin} Effect", &["effect"])
            },
        }
    }

    /// Load a replacement table from TOML (`[core]`, `[widget]`, ...)
    pub fn load_from_path(path: &Path) -> Result<Self, ManifestError> {
        debug!("Loading category defaults from {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ManifestError::Defaults {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn get(&self, category: Category) -> &CategoryDefault {
        match category {
            Category::Core => &self.core,
            Category::Widget => &self.widget,
            Category::Interaction => &self.interaction,
            Category::Effect => &self.effect,
        }
    }
}

impl Default for CategoryDefaults {
    fn default() -> Self {
        Self::builtin()
    }
}

fn base(name: &str, title: &str, dependencies: &[&str]) -> CategoryDefault {
    CategoryDefault {
        name: name.to_string(),
        title: title.to_string(),
        keywords: SmallVec::new(),
        homepage: None,
        demo: None,
        docs: None,
        dependencies: strings(dependencies),
    }
}

fn strings(values: &[&str]) -> SmallVec<[String; 4]> {
    values.iter().map(|v| (*v).to_string()).collect()
}
