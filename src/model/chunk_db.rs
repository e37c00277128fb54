//! The chunk database built from a document's blocks.

use indexmap::IndexMap;

use super::block::{BlockKind, SourceBlock};
use super::chunk_name::{resolve, ChunkName, KnownNames};
use super::element::Element;
use crate::config::{match_header, match_reference};
use crate::errors::{LitweaveError, Result};
use crate::text_location::TextLocation;

/// Namespace a chunk lives in, fixed at its first declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkKind {
    /// Included through `<<name>>` references.
    Ordinary,
    /// Bound to an output destination; an entry point of tangling.
    Root,
}

/// A block contributing to a chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockEntry {
    /// Identifier of the contributing block.
    pub id: String,
    /// Position of this block among the chunk's contributors, from 0.
    pub seq: usize,
}

/// A reference from one block of `includer` to `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackRef {
    pub includer: ChunkName,
    /// Sequence number of the including block within `includer`.
    pub block: usize,
    pub target: ChunkName,
}

/// All chunks of one document run.
///
/// Built in a single pass over the blocks and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ChunkDb {
    /// Every name defined or referenced so far.
    known: KnownNames,
    chunks: IndexMap<ChunkName, Vec<Element>>,
    roots: IndexMap<ChunkName, Vec<Element>>,
    /// Contributing blocks per chunk, roots included.
    blocks: IndexMap<ChunkName, Vec<BlockEntry>>,
    /// Reference edges in recording order.
    back_refs: Vec<BackRef>,
}

impl ChunkDb {
    /// Creates an empty database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the database from blocks in document order.
    ///
    /// Titles of blocks using abbreviated chunk names are rewritten to the
    /// full name.
    pub fn build<B: SourceBlock>(blocks: &mut [B]) -> Result<Self> {
        let mut db = Self::new();
        for block in blocks.iter_mut() {
            db.add_block(block)?;
        }
        tracing::debug!(
            "Chunk database: {} chunks, {} roots, {} references",
            db.chunks.len(),
            db.roots.len(),
            db.back_refs.len()
        );
        Ok(db)
    }

    /// Registers one block.
    pub fn add_block<B: SourceBlock>(&mut self, block: &mut B) -> Result<()> {
        match block.kind() {
            BlockKind::Source => self.add_source_block(block),
            BlockKind::Listing => self.add_listing_block(block),
            BlockKind::Other => Ok(()),
        }
    }

    fn add_source_block<B: SourceBlock>(&mut self, block: &mut B) -> Result<()> {
        let (name, kind) = if let Some(output) = block.output() {
            (ChunkName::new(output), ChunkKind::Root)
        } else if let Some(title) = block.title().map(str::to_string) {
            let resolved = resolve(&title, &self.known)?;
            if resolved.as_str() != title {
                block.set_title(resolved.to_string());
            }
            (resolved, ChunkKind::Ordinary)
        } else {
            tracing::debug!("Skipping untitled source block {}", block.id());
            return Ok(());
        };

        self.contribute(
            block.id(),
            block.language(),
            name,
            kind,
            block.lines(),
            block.location().clone(),
        )
    }

    /// Splits a raw listing on its `<<title>>=` headers.
    fn add_listing_block<B: SourceBlock>(&mut self, block: &mut B) -> Result<()> {
        let lines = block.lines();
        if lines.first().and_then(|l| match_header(l)).is_none() {
            return Ok(());
        }

        let headers: Vec<(usize, &str)> = lines
            .iter()
            .enumerate()
            .filter_map(|(i, line)| match_header(line).map(|title| (i, title)))
            .collect();

        for (n, &(start, title)) in headers.iter().enumerate() {
            let end = headers.get(n + 1).map_or(lines.len(), |&(next, _)| next);
            let name = resolve(title, &self.known)?;
            let kind = if name.looks_like_file() {
                ChunkKind::Root
            } else {
                ChunkKind::Ordinary
            };

            self.contribute(
                block.id(),
                block.language(),
                name,
                kind,
                &lines[start + 1..end],
                block.location().advanced(start + 1),
            )?;
        }
        Ok(())
    }

    fn declare(&self, name: &ChunkName, kind: ChunkKind) -> Result<()> {
        match kind {
            ChunkKind::Root if self.roots.contains_key(name) => {
                Err(LitweaveError::DuplicateRoot(name.clone()))
            }
            ChunkKind::Root if self.chunks.contains_key(name) => {
                Err(LitweaveError::KindConflict(name.clone()))
            }
            ChunkKind::Ordinary if self.roots.contains_key(name) => {
                Err(LitweaveError::KindConflict(name.clone()))
            }
            _ => Ok(()),
        }
    }

    fn contribute(
        &mut self,
        block_id: &str,
        language: Option<&str>,
        name: ChunkName,
        kind: ChunkKind,
        lines: &[String],
        location: TextLocation,
    ) -> Result<()> {
        self.declare(&name, kind)?;
        self.known.insert(name.clone());

        // Later segments of the same listing share its block entry.
        let previous = self.blocks.get(&name).and_then(|list| list.last());
        let (seq, registered) = match previous {
            Some(entry) if entry.id == block_id => (entry.seq, true),
            _ => (self.blocks.get(&name).map_or(0, Vec::len), false),
        };
        let mut elements = Vec::with_capacity(lines.len() + 2);
        if let Some(lang) = language {
            elements.push(Element::language(lang));
        }
        elements.push(Element::position(location));

        for line in lines {
            match match_reference(line) {
                Some((indent, title)) => {
                    let target = resolve(title, &self.known)?;
                    // Stored expanded so later chunks cannot make it ambiguous.
                    let text = if target.as_str() == title {
                        line.clone()
                    } else {
                        format!("{}<<{}>>", indent, target)
                    };
                    self.known.insert(target.clone());
                    self.back_refs.push(BackRef {
                        includer: name.clone(),
                        block: seq,
                        target,
                    });
                    elements.push(Element::text(text));
                }
                None => elements.push(Element::text(line.clone())),
            }
        }

        tracing::debug!("Block {} contributes to {} as #{}", block_id, name, seq + 1);

        let store = match kind {
            ChunkKind::Root => &mut self.roots,
            ChunkKind::Ordinary => &mut self.chunks,
        };
        store.entry(name.clone()).or_default().extend(elements);
        if !registered {
            self.blocks.entry(name).or_default().push(BlockEntry {
                id: block_id.to_string(),
                seq,
            });
        }
        Ok(())
    }

    /// Every name defined or referenced, in first-seen order.
    pub fn known_names(&self) -> &KnownNames {
        &self.known
    }

    /// Elements of an ordinary chunk.
    pub fn chunk(&self, name: &ChunkName) -> Option<&[Element]> {
        self.chunks.get(name).map(Vec::as_slice)
    }

    /// Elements of a root chunk.
    pub fn root(&self, name: &ChunkName) -> Option<&[Element]> {
        self.roots.get(name).map(Vec::as_slice)
    }

    /// Root names in declaration order.
    pub fn root_names(&self) -> impl Iterator<Item = &ChunkName> {
        self.roots.keys()
    }

    /// Root chunks in declaration order.
    pub fn roots(&self) -> impl Iterator<Item = (&ChunkName, &[Element])> {
        self.roots.iter().map(|(n, e)| (n, e.as_slice()))
    }

    /// The namespace of a defined chunk.
    pub fn kind_of(&self, name: &ChunkName) -> Option<ChunkKind> {
        if self.roots.contains_key(name) {
            Some(ChunkKind::Root)
        } else if self.chunks.contains_key(name) {
            Some(ChunkKind::Ordinary)
        } else {
            None
        }
    }

    /// True if `name` is a root chunk.
    pub fn is_root(&self, name: &ChunkName) -> bool {
        self.roots.contains_key(name)
    }

    /// Blocks contributing to `name`, in document order.
    pub fn block_list(&self, name: &ChunkName) -> &[BlockEntry] {
        self.blocks.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Chunks with at least one contributing block.
    pub fn block_lists(&self) -> impl Iterator<Item = (&ChunkName, &[BlockEntry])> {
        self.blocks.iter().map(|(n, b)| (n, b.as_slice()))
    }

    /// Reference edges in recording order.
    pub fn back_refs(&self) -> &[BackRef] {
        &self.back_refs
    }

    /// Number of roots.
    pub fn root_count(&self) -> usize {
        self.roots.len()
    }

    /// Number of ordinary chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }
}
