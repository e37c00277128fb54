//! Configuration data structures.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::line_templates::LineTemplates;

/// Main configuration structure for litweave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Glob patterns for authored documents.
    #[serde(default = "default_source_patterns")]
    pub source_patterns: Vec<String>,

    /// Directory for tangled files, relative to the document.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Root rename table, `name>file` pairs separated by `;`.
    #[serde(default)]
    pub file_map: Option<String>,

    /// Whether weaving writes the chunk dependency graph.
    #[serde(default)]
    pub graph: bool,

    /// Prefix of the document attributes that override this configuration.
    #[serde(default = "default_attribute_prefix")]
    pub attribute_prefix: String,

    /// Position directive templates keyed by language.
    #[serde(default)]
    pub line_templates: LineTemplates,
}

fn default_source_patterns() -> Vec<String> {
    vec!["**/*.adoc".to_string(), "**/*.asciidoc".to_string()]
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_attribute_prefix() -> String {
    "literate-programming".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_patterns: default_source_patterns(),
            output_dir: default_output_dir(),
            file_map: None,
            graph: false,
            attribute_prefix: default_attribute_prefix(),
            line_templates: LineTemplates::default(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all source patterns.
    pub fn source_patterns(&self) -> &[String] {
        &self.source_patterns
    }

    /// Output directory for a document living in `doc_dir`.
    pub fn output_dir_for(&self, doc_dir: &Path) -> PathBuf {
        if self.output_dir.is_absolute() {
            self.output_dir.clone()
        } else {
            doc_dir.join(&self.output_dir)
        }
    }

    /// The rename table, empty if none is configured.
    pub fn file_map(&self) -> &str {
        self.file_map.as_deref().unwrap_or("")
    }
}
