//! `{plugin}` / `{Plugin}` substitution

pub const PLUGIN_TOKEN: &str = "{plugin}";
pub const CAPITALIZED_TOKEN: &str = "{Plugin}";

/// Upper-case only the first character of a plugin identifier
pub fn capitalize(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Replace every token occurrence in a single left-to-right pass, so text
/// inserted for one token is never scanned again.
pub fn substitute(template: &str, plugin: &str, capitalized: &str) -> String {
    let mut out = String::with_capacity(template.len() + plugin.len());
    let mut rest = template;

    while let Some(pos) = rest.find('{') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if let Some(after) = tail.strip_prefix(PLUGIN_TOKEN) {
            out.push_str(plugin);
            rest = after;
        } else if let Some(after) = tail.strip_prefix(CAPITALIZED_TOKEN) {
            out.push_str(capitalized);
            rest = after;
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}

/// A plugin identifier with its display form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginName {
    pub id: String,
    pub capitalized: String,
}

impl PluginName {
    pub fn new(id: &str) -> Self {
        PluginName {
            id: id.to_string(),
            capitalized: capitalize(id),
        }
    }

    pub fn substitute(&self, template: &str) -> String {
        substitute(template, &self.id, &self.capitalized)
    }
}
