//! Source positions of chunk content.

use std::fmt;
use std::path::PathBuf;

/// A (file, line) position in an authored document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextLocation {
    /// The file path (if known).
    pub filename: Option<PathBuf>,
    /// Line number (1-indexed).
    pub line: usize,
}

impl TextLocation {
    /// Creates a new TextLocation.
    pub fn new(filename: Option<PathBuf>, line: usize) -> Self {
        Self { filename, line }
    }

    /// Creates a TextLocation with only line information.
    pub fn line_only(line: usize) -> Self {
        Self {
            filename: None,
            line,
        }
    }

    /// Creates a TextLocation with file and line.
    pub fn file_line(filename: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            filename: Some(filename.into()),
            line,
        }
    }

    /// Returns the same file, `offset` lines further down.
    pub fn advanced(&self, offset: usize) -> Self {
        Self {
            filename: self.filename.clone(),
            line: self.line + offset,
        }
    }

    /// File name as written into position directives.
    pub fn file_label(&self) -> String {
        match &self.filename {
            Some(path) => path.display().to_string(),
            None => "<unknown>".to_string(),
        }
    }
}

impl Default for TextLocation {
    fn default() -> Self {
        Self {
            filename: None,
            line: 1,
        }
    }
}

impl fmt::Display for TextLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.filename {
            Some(path) => write!(f, "{}:{}", path.display(), self.line),
            None => write!(f, "line {}", self.line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_filename() {
        let loc = TextLocation::file_line("doc.adoc", 10);
        assert_eq!(format!("{}", loc), "doc.adoc:10");
    }

    #[test]
    fn test_display_without_filename() {
        let loc = TextLocation::line_only(7);
        assert_eq!(format!("{}", loc), "line 7");
        assert_eq!(loc.file_label(), "<unknown>");
    }

    #[test]
    fn test_advanced() {
        let loc = TextLocation::file_line("doc.adoc", 10).advanced(3);
        assert_eq!(loc.line, 13);
        assert_eq!(loc.file_label(), "doc.adoc");
    }
}
