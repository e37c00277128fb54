//! Blocks handed over by the document model.

use serde::Serialize;

use crate::text_location::TextLocation;

/// Attribute naming the output file of a root chunk.
pub const OUTPUT_ATTRIBUTE: &str = "output";

/// Attribute naming the language of a block.
pub const LANGUAGE_ATTRIBUTE: &str = "language";

/// What kind of content a block carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// Formatted source code; chunks are named by title or output attribute.
    Source,
    /// Raw listing; chunks are introduced by `<<title>>=` header lines.
    Listing,
    /// Anything else. Never chunk content.
    Other,
}

/// The view of a document block the chunk engine needs.
///
/// Implemented by whatever document model feeds the engine; the engine
/// only reads block content and rewrites titles.
pub trait SourceBlock {
    /// Stable identifier, usable as a link anchor.
    fn id(&self) -> &str;

    /// The content kind.
    fn kind(&self) -> BlockKind;

    /// The displayed title, if any.
    fn title(&self) -> Option<&str>;

    /// Replaces the displayed title.
    fn set_title(&mut self, title: String);

    /// Looks up a block attribute.
    fn attribute(&self, key: &str) -> Option<&str>;

    /// Content lines, substitutions already applied.
    fn lines(&self) -> &[String];

    /// Location of the first content line.
    fn location(&self) -> &TextLocation;

    /// Explicit output binding of a root chunk.
    fn output(&self) -> Option<&str> {
        self.attribute(OUTPUT_ATTRIBUTE)
    }

    /// Declared language tag.
    fn language(&self) -> Option<&str> {
        self.attribute(LANGUAGE_ATTRIBUTE)
    }
}

/// An owned block, as produced by the bundled readers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub id: String,
    pub kind: BlockKind,
    pub title: Option<String>,
    pub attributes: Vec<(String, String)>,
    pub lines: Vec<String>,
    pub location: TextLocation,
}

impl Block {
    /// Creates a block with no title and no attributes.
    pub fn new(
        id: impl Into<String>,
        kind: BlockKind,
        lines: Vec<String>,
        location: TextLocation,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            title: None,
            attributes: Vec::new(),
            lines,
            location,
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Adds an attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }
}

impl SourceBlock for Block {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> BlockKind {
        self.kind
    }

    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn set_title(&mut self, title: String) {
        self.title = Some(title);
    }

    fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn lines(&self) -> &[String] {
        &self.lines
    }

    fn location(&self) -> &TextLocation {
        &self.location
    }
}
