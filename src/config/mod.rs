//! Configuration loading and management.

mod config_data;
mod config_update;
mod line_templates;
mod markers;

use std::fs;
use std::path::{Path, PathBuf};

pub use config_data::Config;
pub use config_update::ConfigUpdate;
pub use line_templates::{render_directive, LineTemplates, DEFAULT_KEY};
pub use markers::{
    match_header, match_reference, ELLIPSIS, HEADER_PATTERN, PRIMARY_STREAM, REF_PATTERN,
};

use crate::errors::{LitweaveError, Result};

/// Standard configuration file names to search for.
const CONFIG_FILES: &[&str] = &["litweave.toml", ".litweave.toml"];

/// Finds the configuration file in the given directory or its parents.
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        for name in CONFIG_FILES {
            let candidate = current.join(name);
            if candidate.exists() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Reads configuration from a TOML file.
pub fn read_config_file(path: &Path) -> Result<Config> {
    if !path.is_file() {
        return Err(LitweaveError::Config(format!(
            "configuration file {} not found",
            path.display()
        )));
    }
    let content = fs::read_to_string(path)?;
    let update: ConfigUpdate = toml::from_str(&content)?;
    Ok(update.merge_into(&Config::default()))
}

/// Reads configuration, searching from the given directory.
///
/// If no config file is found, returns the default configuration.
pub fn read_config(start_dir: &Path) -> Result<Config> {
    match find_config_file(start_dir) {
        Some(path) => {
            tracing::debug!("Using configuration {}", path.display());
            read_config_file(&path)
        }
        None => Ok(Config::default()),
    }
}
