//! Chunk syntax markers.

use once_cell::sync::Lazy;
use regex::Regex;

/// Suffix marking an abbreviated chunk title.
pub const ELLIPSIS: &str = "...";

/// Root name routed to the primary output stream instead of a file.
pub const PRIMARY_STREAM: &str = "*";

/// Reference pattern for noweb-style references like `  <<chunk title>>`.
pub static REF_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<indent>\s*)<<(?P<title>.+?)>>\s*$").unwrap());

/// Chunk header inside a raw listing: `<<chunk title>>=`, no indentation.
pub static HEADER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<<(?P<title>.+?)>>=$").unwrap());

/// Splits a reference line into `(indent, title)`.
pub fn match_reference(line: &str) -> Option<(&str, &str)> {
    let caps = REF_PATTERN.captures(line)?;
    let indent = caps.name("indent")?.as_str();
    let title = caps.name("title")?.as_str();
    Some((indent, title))
}

/// Returns the chunk title of a raw listing header line.
pub fn match_header(line: &str) -> Option<&str> {
    HEADER_PATTERN
        .captures(line)
        .and_then(|caps| caps.name("title"))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ref_pattern() {
        assert_eq!(
            match_reference("    <<some chunk>>"),
            Some(("    ", "some chunk"))
        );
        assert_eq!(match_reference("<<main.c>>  "), Some(("", "main.c")));
        assert_eq!(match_reference("\t<<Read...>>"), Some(("\t", "Read...")));

        assert!(match_reference("not a ref").is_none());
        assert!(match_reference("<<>>").is_none());
        assert!(match_reference("x = <<y>>").is_none());
        assert!(match_reference("<<header>>=").is_none());
    }

    #[test]
    fn test_header_pattern() {
        assert_eq!(match_header("<<main.c>>="), Some("main.c"));
        assert_eq!(match_header("<<Parse input>>="), Some("Parse input"));

        assert!(match_header("  <<indented>>=").is_none());
        assert!(match_header("<<trailing>>= ").is_none());
        assert!(match_header("<<plain ref>>").is_none());
    }
}
