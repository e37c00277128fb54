//! Configuration update and merging.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::config_data::Config;
use super::line_templates::{LineTemplates, DEFAULT_KEY};

/// Partial configuration update that can be merged into a Config.
///
/// All fields are optional. Only specified fields will override the base config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigUpdate {
    #[serde(default)]
    pub source_patterns: Option<Vec<String>>,

    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    #[serde(default)]
    pub file_map: Option<String>,

    #[serde(default)]
    pub graph: Option<bool>,

    #[serde(default)]
    pub attribute_prefix: Option<String>,

    /// Templates overlaid onto the base templates, not replacing them.
    #[serde(default)]
    pub line_templates: Option<LineTemplates>,
}

impl ConfigUpdate {
    /// Creates an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads overrides from document attributes named `<prefix>-<setting>`.
    ///
    /// Recognized settings are `outdir`, `file-map`, `graph`, `linedir` and
    /// `linedir-<language>`.
    pub fn from_attributes(prefix: &str, attributes: &IndexMap<String, String>) -> Self {
        let mut update = Self::new();
        let mut templates: Option<LineTemplates> = None;

        for (key, value) in attributes {
            let Some(setting) = key
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_prefix('-'))
            else {
                continue;
            };

            match setting {
                "outdir" => update.output_dir = Some(PathBuf::from(value)),
                "file-map" => update.file_map = Some(value.clone()),
                "graph" => update.graph = Some(parse_flag(value)),
                "linedir" => templates
                    .get_or_insert_with(LineTemplates::empty)
                    .set(DEFAULT_KEY, value.clone()),
                other => {
                    if let Some(lang) = other.strip_prefix("linedir-") {
                        templates
                            .get_or_insert_with(LineTemplates::empty)
                            .set(lang, value.clone());
                    } else {
                        tracing::debug!("Ignoring unknown attribute {}", key);
                    }
                }
            }
        }

        update.line_templates = templates;
        update
    }

    /// Merges this update into a base configuration, returning a new Config.
    ///
    /// Consumes `self` so fields can be moved instead of cloned.
    pub fn merge_into(self, base: &Config) -> Config {
        let mut line_templates = base.line_templates.clone();
        if let Some(overlay) = self.line_templates {
            line_templates.merge(&overlay);
        }

        Config {
            source_patterns: self
                .source_patterns
                .unwrap_or_else(|| base.source_patterns.clone()),
            output_dir: self.output_dir.unwrap_or_else(|| base.output_dir.clone()),
            file_map: self.file_map.or_else(|| base.file_map.clone()),
            graph: self.graph.unwrap_or(base.graph),
            attribute_prefix: self
                .attribute_prefix
                .unwrap_or_else(|| base.attribute_prefix.clone()),
            line_templates,
        }
    }
}

/// AsciiDoc-style flag: set (even empty) means true unless spelled false.
fn parse_flag(value: &str) -> bool {
    !matches!(value.trim(), "false" | "no" | "0")
}
