//! Staging task definitions (`[[copy]]`, `[[zip]]`, `[[md5]]` tables)

use serde::{Deserialize, Serialize};

/// A named copy task: sources copied under `dest` with version substitution
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CopyTask {
    pub name: String,
    /// Files or directories, walked recursively
    pub sources: Vec<String>,
    /// Destination directory, `{version}` expanded
    pub dest: String,
    /// Literal prefix removed from each source path before joining onto `dest`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strip: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub renames: Vec<Rename>,
}

/// One extra file copied under a new name
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Rename {
    pub from: String,
    /// Target path relative to the task's `dest`, `{version}` expanded
    pub to: String,
}

/// Archive `src` (relative to `cwd`) into `dest`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ZipTask {
    pub name: String,
    pub src: String,
    pub dest: String,
    #[serde(default = "default_zip_cwd")]
    pub cwd: String,
}

fn default_zip_cwd() -> String {
    "dist".to_string()
}

/// Write an md5 list of every file under `src` to `dest`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HashTask {
    pub name: String,
    pub src: String,
    pub dest: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zip_task_defaults_cwd_to_dist() {
        let task: Result<ZipTask, _> =
            toml::from_str("name = \"cdn\"\nsrc = \"jquery-ui-{version}\"\ndest = \"ui.zip\"\n");
        assert!(task.is_ok_and(|t| t.cwd == "dist"));
    }

    #[test]
    fn test_copy_task_renames_parse() {
        let source = r#"
name = "cdn"
sources = ["dist/jquery-ui-{version}/ui"]
dest = "dist/cdn"
strip = "dist/jquery-ui-{version}/"
renames = [{ from = "dist/jquery-ui.min.js", to = "ui/jquery-ui.min.js" }]
"#;
        let task: Result<CopyTask, _> = toml::from_str(source);
        assert!(task.is_ok_and(|t| t.renames.len() == 1
            && t.renames[0].to == "ui/jquery-ui.min.js"
            && t.strip.as_deref() == Some("dist/jquery-ui-{version}/")));
    }
}
