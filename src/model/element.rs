//! Chunk elements.

use crate::config::match_reference;
use crate::text_location::TextLocation;

/// One entry of a chunk's content, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// A literal line; reference lines are expanded when tangling.
    Text(String),
    /// Coordinates of the next text line.
    Position(TextLocation),
    /// Language of the following text lines, selecting their directive template.
    Language(String),
}

impl Element {
    /// Creates a text element.
    pub fn text(s: impl Into<String>) -> Self {
        Element::Text(s.into())
    }

    /// Creates a position marker.
    pub fn position(location: TextLocation) -> Self {
        Element::Position(location)
    }

    /// Creates a language marker.
    pub fn language(tag: impl Into<String>) -> Self {
        Element::Language(tag.into())
    }

    /// Returns `(indent, title)` if this is a reference line.
    pub fn as_reference(&self) -> Option<(&str, &str)> {
        match self {
            Element::Text(line) => match_reference(line),
            _ => None,
        }
    }
}
