//! Routing of root chunks to files or the primary output stream.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::config::PRIMARY_STREAM;
use crate::errors::{LitweaveError, Result};
use crate::model::ChunkName;

/// Separator between entries of a rename table.
pub const FILE_MAP_SEPARATOR: char = ';';

/// Where a root chunk is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// The primary output stream (standard output for the CLI).
    Primary,
    /// A file, truncated before writing.
    File(PathBuf),
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Primary => write!(f, "<stdout>"),
            Destination::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Parses `name>file;name>file` into trimmed pairs.
///
/// An entry without `>` yields an empty target; blank entries are dropped.
pub fn parse_file_map(table: &str) -> Vec<(String, String)> {
    table
        .split(FILE_MAP_SEPARATOR)
        .filter(|entry| !entry.trim().is_empty())
        .map(|entry| match entry.split_once('>') {
            Some((name, file)) => (name.trim().to_string(), file.trim().to_string()),
            None => (entry.trim().to_string(), String::new()),
        })
        .collect()
}

/// Maps root chunk names to destinations.
#[derive(Debug, Clone)]
pub struct OutputRouter {
    output_dir: PathBuf,
    renames: IndexMap<ChunkName, String>,
}

impl OutputRouter {
    /// Creates a router for `roots`, applying the rename table `file_map`.
    ///
    /// Entries naming unknown roots or with an empty side are skipped with a
    /// warning. A target equal to another root's name or to another entry's
    /// target is an error.
    pub fn new<'a>(
        output_dir: impl Into<PathBuf>,
        roots: impl IntoIterator<Item = &'a ChunkName>,
        file_map: &str,
    ) -> Result<Self> {
        let roots: Vec<&ChunkName> = roots.into_iter().collect();
        let mut renames = IndexMap::new();
        let mut targets = HashSet::new();

        for (name, file) in parse_file_map(file_map) {
            if name.is_empty() || file.is_empty() {
                tracing::warn!("Ignoring incomplete file map entry '{}>{}'", name, file);
                continue;
            }
            let name = ChunkName::new(name);
            if !roots.contains(&&name) {
                tracing::warn!("Ignoring file map entry for unknown root {}", name);
                continue;
            }
            if roots.iter().any(|r| r.as_str() == file && **r != name) || !targets.insert(file.clone())
            {
                return Err(LitweaveError::FilenameCollision { file, root: name });
            }
            if let Some(previous) = renames.insert(name.clone(), file) {
                tracing::warn!("Root {} mapped more than once, dropping {}", name, previous);
            }
        }

        Ok(Self {
            output_dir: output_dir.into(),
            renames,
        })
    }

    /// The directory files are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Output name of `root` after renaming.
    pub fn output_name<'a>(&'a self, root: &'a ChunkName) -> &'a str {
        self.renames
            .get(root)
            .map(String::as_str)
            .unwrap_or_else(|| root.as_str())
    }

    /// Resolves the destination of `root`.
    pub fn destination(&self, root: &ChunkName) -> Destination {
        match self.output_name(root) {
            PRIMARY_STREAM => Destination::Primary,
            name => Destination::File(self.output_dir.join(name)),
        }
    }

    /// Writes `content` for `root`, creating directories as needed.
    pub fn write(
        &self,
        root: &ChunkName,
        content: &[u8],
        primary: &mut dyn Write,
    ) -> Result<Destination> {
        let destination = self.destination(root);
        match &destination {
            Destination::Primary => {
                primary.write_all(content)?;
                primary.flush()?;
            }
            Destination::File(path) => {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(path, content)?;
            }
        }
        tracing::info!("Tangled {} to {}", root, destination);
        Ok(destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn names(list: &[&str]) -> Vec<ChunkName> {
        list.iter().map(|n| ChunkName::new(*n)).collect()
    }

    #[test]
    fn test_parse_file_map() {
        assert_eq!(
            parse_file_map(" main.c > a.out.c ;util.c>u.c;; broken "),
            vec![
                ("main.c".to_string(), "a.out.c".to_string()),
                ("util.c".to_string(), "u.c".to_string()),
                ("broken".to_string(), String::new()),
            ]
        );
        assert!(parse_file_map("").is_empty());
    }

    #[test]
    fn test_remap() {
        let roots = names(&["main.c", "util.c"]);
        let router = OutputRouter::new("out", &roots, "main.c>a.out.c").unwrap();

        assert_eq!(
            router.destination(&roots[0]),
            Destination::File(PathBuf::from("out/a.out.c"))
        );
        assert_eq!(
            router.destination(&roots[1]),
            Destination::File(PathBuf::from("out/util.c"))
        );
    }

    #[test]
    fn test_invalid_entries_ignored() {
        let roots = names(&["main.c"]);
        let router =
            OutputRouter::new(".", &roots, "nothere.c>x.c; >y.c; main.c> ;main.c").unwrap();
        assert_eq!(router.output_name(&roots[0]), "main.c");
    }

    #[test]
    fn test_collision_with_root() {
        let roots = names(&["main.c", "util.c"]);
        let err = OutputRouter::new(".", &roots, "main.c>util.c").unwrap_err();
        assert!(matches!(err, LitweaveError::FilenameCollision { .. }));
    }

    #[test]
    fn test_collision_between_targets() {
        let roots = names(&["a.c", "b.c"]);
        let err = OutputRouter::new(".", &roots, "a.c>x.c;b.c>x.c").unwrap_err();
        assert!(matches!(err, LitweaveError::FilenameCollision { ref file, .. } if file == "x.c"));
    }

    #[test]
    fn test_swap_is_a_collision() {
        let roots = names(&["a.c", "b.c"]);
        assert!(OutputRouter::new(".", &roots, "a.c>b.c;b.c>a.c").is_err());
    }

    #[test]
    fn test_primary_stream() {
        let roots = names(&["main.c", "util.c"]);
        let router = OutputRouter::new(".", &roots, "main.c>*").unwrap();
        assert_eq!(router.destination(&roots[0]), Destination::Primary);

        let star = names(&["*"]);
        let router = OutputRouter::new(".", &star, "").unwrap();
        let mut primary = Vec::new();
        let dest = router.write(&star[0], b"hello\n", &mut primary).unwrap();
        assert_eq!(dest, Destination::Primary);
        assert_eq!(primary, b"hello\n");
    }

    #[test]
    fn test_write_creates_directories_and_truncates() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("build");
        let roots = names(&["src/main.c"]);
        let router = OutputRouter::new(&out, &roots, "").unwrap();

        let path = out.join("src/main.c");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "old content that is longer").unwrap();

        let mut primary = Vec::new();
        router.write(&roots[0], b"new\n", &mut primary).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
        assert!(primary.is_empty());
    }
}
