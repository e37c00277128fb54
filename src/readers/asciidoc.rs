//! AsciiDoc parsing for listing block extraction.
//!
//! Only the structure the chunk engine needs is recognised: document
//! attribute entries, block titles, anchors, block attribute lists and
//! `----` delimited listing blocks. Everything else is prose and skipped.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{LitweaveError, Result};
use crate::model::{Block, BlockKind, LANGUAGE_ATTRIBUTE};
use crate::text_location::TextLocation;

use super::attributes::AttributeList;

/// Prefix of generated block ids.
pub const AUTO_ID_PREFIX: &str = "_lp_block_";

/// Document attribute supplying the language of `[source]` blocks without one.
pub const SOURCE_LANGUAGE_ATTRIBUTE: &str = "source-language";

static ATTRIBUTE_ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^:(?P<name>[A-Za-z0-9_][A-Za-z0-9_-]*):(?:\s+(?P<value>.*?))?\s*$").unwrap()
});

static ANCHOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[\[(?P<id>[A-Za-z_:][\w:.-]*)(?:,[^\]]*)?\]\]\s*$").unwrap());

static BLOCK_TITLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\.(?P<title>[^.\s].*)$").unwrap());

static LISTING_DELIMITER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-{4,}\s*$").unwrap());

static COMMENT_DELIMITER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^/{4,}\s*$").unwrap());

/// A parsed AsciiDoc document.
#[derive(Debug, Default)]
pub struct ParsedDocument {
    /// Listing blocks in document order.
    pub blocks: Vec<Block>,
    /// Document attribute entries, later entries overriding earlier ones.
    pub attributes: IndexMap<String, String>,
    /// Source file path.
    pub source_path: Option<PathBuf>,
}

impl ParsedDocument {
    /// Creates a new empty parsed document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source path.
    pub fn with_source_path(mut self, path: PathBuf) -> Self {
        self.source_path = Some(path);
        self
    }
}

/// Metadata lines collected ahead of a block.
#[derive(Debug, Default)]
struct PendingMetadata {
    title: Option<String>,
    id: Option<String>,
    attributes: Option<AttributeList>,
}

impl PendingMetadata {
    fn is_empty(&self) -> bool {
        self.title.is_none() && self.id.is_none() && self.attributes.is_none()
    }
}

/// Parses an AsciiDoc document and extracts its listing blocks.
pub fn parse_asciidoc(input: &str, source_path: Option<&Path>) -> Result<ParsedDocument> {
    let mut doc = ParsedDocument::new();
    if let Some(path) = source_path {
        doc.source_path = Some(path.to_path_buf());
    }

    let location_of = |line: usize| match source_path {
        Some(path) => TextLocation::file_line(path, line),
        None => TextLocation::line_only(line),
    };

    let lines: Vec<&str> = input.lines().collect();
    let mut pending = PendingMetadata::default();
    let mut index = 0;

    while index < lines.len() {
        let line = lines[index];
        let line_number = index + 1;
        index += 1;

        // Comment blocks run to the matching delimiter, or to the end.
        if COMMENT_DELIMITER.is_match(line) {
            let delimiter = line.trim_end();
            index = lines[index..]
                .iter()
                .position(|l| l.trim_end() == delimiter)
                .map_or(lines.len(), |offset| index + offset + 1);
            continue;
        }

        if LISTING_DELIMITER.is_match(line) {
            let delimiter = line.trim_end();
            let Some(offset) = lines[index..]
                .iter()
                .position(|l| l.trim_end() == delimiter)
            else {
                return Err(LitweaveError::Parse {
                    location: location_of(line_number),
                    message: "unterminated listing block".to_string(),
                });
            };
            let content: Vec<String> = lines[index..index + offset]
                .iter()
                .map(|l| l.to_string())
                .collect();
            index += offset + 1;

            let meta = std::mem::take(&mut pending);
            let block = make_block(
                meta,
                content,
                location_of(line_number + 1),
                doc.blocks.len() + 1,
                &doc.attributes,
            );
            tracing::debug!("Found {:?} block {} at {}", block.kind, block.id, block.location);
            doc.blocks.push(block);
            continue;
        }

        if line.trim().is_empty() {
            continue;
        }

        if line.starts_with("//") {
            continue;
        }

        if pending.is_empty() {
            if let Some(caps) = ATTRIBUTE_ENTRY.captures(line) {
                let value = caps.name("value").map(|m| m.as_str()).unwrap_or_default();
                doc.attributes
                    .insert(caps["name"].to_string(), value.to_string());
                continue;
            }
        }

        if let Some(caps) = ANCHOR.captures(line) {
            pending.id = Some(caps["id"].to_string());
        } else if let Some(attrs) = line.starts_with('[').then(|| AttributeList::parse(line)).flatten() {
            if let Some(id) = attrs.id() {
                pending.id = Some(id.to_string());
            }
            pending.attributes = Some(attrs);
        } else if let Some(caps) = BLOCK_TITLE.captures(line) {
            pending.title = Some(caps["title"].trim().to_string());
        } else {
            // Prose; metadata only binds to the very next block.
            pending = PendingMetadata::default();
        }
    }

    Ok(doc)
}

fn make_block(
    meta: PendingMetadata,
    lines: Vec<String>,
    location: TextLocation,
    seq: usize,
    doc_attributes: &IndexMap<String, String>,
) -> Block {
    let attrs = meta.attributes.unwrap_or_default();
    let kind = match attrs.style() {
        Some("source") => BlockKind::Source,
        Some("listing") | None => BlockKind::Listing,
        Some(_) => BlockKind::Other,
    };
    let id = meta
        .id
        .unwrap_or_else(|| format!("{}{}", AUTO_ID_PREFIX, seq));

    let mut block = Block::new(id, kind, lines, location);
    if let Some(title) = meta.title {
        block = block.with_title(title);
    }

    let language = attrs.language().map(str::to_string).or_else(|| {
        (kind == BlockKind::Source)
            .then(|| doc_attributes.get(SOURCE_LANGUAGE_ATTRIBUTE).cloned())
            .flatten()
    });
    if let Some(language) = language {
        block = block.with_attribute(LANGUAGE_ATTRIBUTE, language);
    }
    for (key, value) in attrs.named() {
        if key != "id" && key != LANGUAGE_ATTRIBUTE {
            block = block.with_attribute(key, value);
        }
    }
    block
}

/// Reads an AsciiDoc file and parses it.
pub fn read_asciidoc_file(path: &Path) -> Result<ParsedDocument> {
    let content = std::fs::read_to_string(path)?;
    parse_asciidoc(&content, Some(path))
}
