//! Shared test utilities.

use crate::model::{Block, BlockKind};
use crate::text_location::TextLocation;

fn lines(content: &[&str]) -> Vec<String> {
    content.iter().map(|l| l.to_string()).collect()
}

fn location() -> TextLocation {
    TextLocation::file_line("doc.adoc", 10)
}

/// Creates a titled source block, contributing to an ordinary chunk.
pub fn source_block(id: &str, title: &str, content: &[&str]) -> Block {
    Block::new(id, BlockKind::Source, lines(content), location()).with_title(title)
}

/// Creates a source block bound to an output file.
pub fn root_block(id: &str, output: &str, content: &[&str]) -> Block {
    Block::new(id, BlockKind::Source, lines(content), location()).with_attribute("output", output)
}

/// Creates a raw listing block.
pub fn listing_block(id: &str, content: &[&str]) -> Block {
    Block::new(id, BlockKind::Listing, lines(content), location())
}
