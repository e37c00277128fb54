//! Execution context for litweave operations.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::errors::Result;

/// Context for one litweave run.
///
/// Holds the configuration read from `litweave.toml` and the directory
/// relative paths are resolved against. Nothing survives between runs.
#[derive(Debug, Clone)]
pub struct Context {
    /// Configuration.
    pub config: Config,
    /// Base directory for operations.
    pub base_dir: PathBuf,
}

impl Context {
    /// Creates a new context with the given configuration.
    pub fn new(config: Config, base_dir: PathBuf) -> Self {
        Self { config, base_dir }
    }

    /// Creates a context with default configuration.
    pub fn default_for_dir(base_dir: PathBuf) -> Self {
        Self::new(Config::default(), base_dir)
    }

    /// Creates a context for `base_dir`, reading the configuration file
    /// found there or in a parent directory.
    pub fn for_dir(base_dir: PathBuf) -> Result<Self> {
        let config = crate::config::read_config(&base_dir)?;
        Ok(Self::new(config, base_dir))
    }

    /// Creates a context from the current directory.
    pub fn from_current_dir() -> Result<Self> {
        Self::for_dir(std::env::current_dir()?)
    }

    /// Returns document paths matching the configured patterns.
    pub fn source_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for pattern in self.config.source_patterns() {
            let full_pattern = self.base_dir.join(pattern);
            for path in glob::glob(&full_pattern.to_string_lossy())?.filter_map(|r| r.ok()) {
                let relative = path
                    .strip_prefix(&self.base_dir)
                    .map(Path::to_path_buf)
                    .unwrap_or(path);
                files.push(relative);
            }
        }
        files.sort();
        files.dedup();
        Ok(files)
    }

    /// Resolves a path relative to the base directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_path() {
        let dir = tempdir().unwrap();
        let ctx = Context::default_for_dir(dir.path().to_path_buf());

        let resolved = ctx.resolve_path(Path::new("docs/book.adoc"));
        assert_eq!(resolved, dir.path().join("docs/book.adoc"));

        let resolved = ctx.resolve_path(Path::new("/absolute/path"));
        assert_eq!(resolved, PathBuf::from("/absolute/path"));
    }

    #[test]
    fn test_source_files() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("docs")).unwrap();
        fs::write(dir.path().join("index.adoc"), "= Index").unwrap();
        fs::write(dir.path().join("docs/part.asciidoc"), "= Part").unwrap();
        fs::write(dir.path().join("notes.txt"), "text").unwrap();

        let ctx = Context::default_for_dir(dir.path().to_path_buf());
        let files = ctx.source_files().unwrap();

        assert_eq!(
            files,
            vec![PathBuf::from("docs/part.asciidoc"), PathBuf::from("index.adoc")]
        );
    }

    #[test]
    fn test_for_dir_reads_config() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("litweave.toml"), "graph = true\n").unwrap();

        let ctx = Context::for_dir(dir.path().to_path_buf()).unwrap();
        assert!(ctx.config.graph);
    }
}
