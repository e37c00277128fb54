//! Core model types for litweave.

mod block;
mod chunk_db;
mod chunk_name;
mod element;
mod graph;
mod tangle;
mod weave;

pub use block::{Block, BlockKind, SourceBlock, LANGUAGE_ATTRIBUTE, OUTPUT_ATTRIBUTE};
pub use chunk_db::{BackRef, BlockEntry, ChunkDb, ChunkKind};
pub use chunk_name::{resolve, ChunkName, KnownNames};
pub use element::Element;
pub use graph::{graph_file_name, render_graph, wrap_label, write_graph, GRAPH_SUFFIX, WRAP_WIDTH};
pub use tangle::Tangler;
pub use weave::{annotated_title, chunk_links, render_nav, weave, LinkKind, NavLink, TitleUpdate};
