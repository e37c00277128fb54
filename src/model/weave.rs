//! Cross-reference navigation between chunk blocks.
//!
//! Every block of a chunk gets links to the blocks that include the chunk,
//! followed by links to the previous and next block of the same chunk.
//! The links are appended to the block title as an inline annotation.

use indexmap::IndexMap;
use serde::Serialize;

use super::block::SourceBlock;
use super::chunk_db::ChunkDb;
use super::chunk_name::ChunkName;

/// Where a navigation link points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LinkKind {
    /// A block that references this chunk.
    Up {
        includer: ChunkName,
        /// 1-based block number, only when the includer has several blocks.
        part: Option<usize>,
    },
    /// The previous block of the same chunk.
    Prev,
    /// The next block of the same chunk.
    Next,
}

/// A link to another block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    #[serde(flatten)]
    pub kind: LinkKind,
    /// Identifier of the linked block.
    pub target: String,
}

impl NavLink {
    /// Text shown for the link.
    pub fn label(&self) -> String {
        match &self.kind {
            LinkKind::Up {
                includer,
                part: Some(n),
            } => format!("\u{2191} {} ({})", includer, n),
            LinkKind::Up { includer, .. } => format!("\u{2191} {}", includer),
            LinkKind::Prev => "\u{2190} prev".to_string(),
            LinkKind::Next => "next \u{2192}".to_string(),
        }
    }

    /// AsciiDoc cross reference for the link.
    pub fn render(&self) -> String {
        format!("xref:{}[{}]", self.target, self.label().replace(']', "\\]"))
    }
}

/// A block title rewritten by weaving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleUpdate {
    pub id: String,
    pub title: String,
    pub links: Vec<NavLink>,
}

/// Links for block `index` of chunk `name`: uplinks in recording order,
/// then prev, then next.
pub fn chunk_links(db: &ChunkDb, name: &ChunkName, index: usize) -> Vec<NavLink> {
    let blocks = db.block_list(name);
    let mut links = Vec::new();

    for edge in db.back_refs().iter().filter(|e| &e.target == name) {
        let includer_blocks = db.block_list(&edge.includer);
        let Some(entry) = includer_blocks.get(edge.block) else {
            continue;
        };
        let part = (includer_blocks.len() > 1).then_some(edge.block + 1);
        links.push(NavLink {
            kind: LinkKind::Up {
                includer: edge.includer.clone(),
                part,
            },
            target: entry.id.clone(),
        });
    }

    if index > 0 {
        if let Some(prev) = blocks.get(index - 1) {
            links.push(NavLink {
                kind: LinkKind::Prev,
                target: prev.id.clone(),
            });
        }
    }
    if let Some(next) = blocks.get(index + 1) {
        links.push(NavLink {
            kind: LinkKind::Next,
            target: next.id.clone(),
        });
    }
    links
}

/// Renders links as a right-aligned inline annotation.
pub fn render_nav(links: &[NavLink]) -> String {
    let rendered: Vec<String> = links.iter().map(NavLink::render).collect();
    format!("[.lp-nav.right]#{}#", rendered.join(" "))
}

/// The original title followed by the navigation annotation.
pub fn annotated_title(title: Option<&str>, links: &[NavLink]) -> String {
    let nav = render_nav(links);
    match title {
        Some(t) if !t.is_empty() => format!("{} {}", t, nav),
        _ => nav,
    }
}

/// Rewrites the titles of all chunk blocks with navigation links.
///
/// A block contributing to several chunks gets the links of all of them.
pub fn weave<B: SourceBlock>(db: &ChunkDb, blocks: &mut [B]) -> Vec<TitleUpdate> {
    let mut per_block: IndexMap<&str, Vec<NavLink>> = IndexMap::new();
    for (name, entries) in db.block_lists() {
        for (index, entry) in entries.iter().enumerate() {
            let links = chunk_links(db, name, index);
            if !links.is_empty() {
                per_block.entry(entry.id.as_str()).or_default().extend(links);
            }
        }
    }

    let mut updates = Vec::new();
    for block in blocks.iter_mut() {
        let Some(links) = per_block.shift_remove(block.id()) else {
            continue;
        };
        let title = annotated_title(block.title(), &links);
        tracing::debug!("Weaving {} links into block {}", links.len(), block.id());
        updates.push(TitleUpdate {
            id: block.id().to_string(),
            title: title.clone(),
            links,
        });
        block.set_title(title);
    }
    updates
}
