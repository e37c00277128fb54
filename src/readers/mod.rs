//! Readers for parsing AsciiDoc documents.

mod asciidoc;
mod attributes;

pub use asciidoc::{
    parse_asciidoc, read_asciidoc_file, ParsedDocument, AUTO_ID_PREFIX, SOURCE_LANGUAGE_ATTRIBUTE,
};
pub use attributes::{AttributeItem, AttributeList};
