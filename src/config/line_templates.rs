//! Position directive templates.
//!
//! A template is a format string with two slots, `{line}` and `{file}`.
//! The template registered under `_` applies to every language without an
//! override of its own. An empty template disables directives.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Key of the template used when no per-language override exists.
pub const DEFAULT_KEY: &str = "_";

fn default_template() -> String {
    "#line {line} \"{file}\"".to_string()
}

/// Position directive templates keyed by language tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineTemplates(IndexMap<String, String>);

impl Default for LineTemplates {
    fn default() -> Self {
        let mut map = IndexMap::new();
        map.insert(DEFAULT_KEY.to_string(), default_template());
        Self(map)
    }
}

impl LineTemplates {
    /// Templates with no directive emitted for any language.
    pub fn disabled() -> Self {
        let mut map = IndexMap::new();
        map.insert(DEFAULT_KEY.to_string(), String::new());
        Self(map)
    }

    /// No templates at all; used as an overlay.
    pub fn empty() -> Self {
        Self(IndexMap::new())
    }

    /// Registers a template for `language`, or the default for `_`.
    pub fn set(&mut self, language: impl Into<String>, template: impl Into<String>) {
        self.0.insert(language.into(), template.into());
    }

    /// The default template.
    pub fn default_template(&self) -> &str {
        self.0.get(DEFAULT_KEY).map(String::as_str).unwrap_or("")
    }

    /// The template for `language`, falling back to the default.
    pub fn for_language(&self, language: &str) -> &str {
        self.0
            .get(language)
            .map(String::as_str)
            .unwrap_or_else(|| self.default_template())
    }

    /// Overlays `other` onto these templates.
    pub fn merge(&mut self, other: &LineTemplates) {
        for (lang, template) in &other.0 {
            self.0.insert(lang.clone(), template.clone());
        }
    }

    /// Number of registered templates, default included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no template is registered at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Renders one directive; `None` when the template is empty.
pub fn render_directive(template: &str, file: &str, line: usize) -> Option<String> {
    if template.is_empty() {
        return None;
    }
    Some(
        template
            .replace("{line}", &line.to_string())
            .replace("{file}", file),
    )
}
