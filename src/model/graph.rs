//! Chunk dependency graph in Graphviz DOT format.
//!
//! One record node per known chunk. A chunk assembled from several blocks
//! has one port per block (`b0`, `b1`, ...) besides its generic port `all`.
//! Edges run from the including chunk to the included one.

use std::io::Write;

use super::chunk_db::{BackRef, ChunkDb};
use crate::errors::Result;

/// Column at which node labels are wrapped.
pub const WRAP_WIDTH: usize = 24;

/// Suffix appended to the document stem to name the graph file.
pub const GRAPH_SUFFIX: &str = ".lp.dot";

/// Name of the graph file for a document stem.
pub fn graph_file_name(doc_stem: &str) -> String {
    format!("{}{}", doc_stem, GRAPH_SUFFIX)
}

/// Greedy word wrap at `width` columns; long words get a line of their own.
pub fn wrap_label(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Escapes record label metacharacters.
fn escape_record(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '{' | '}' | '|' | '<' | '>' | '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn node_id(index: usize) -> String {
    format!("c{}", index)
}

/// Renders the chunk graph of `db`.
pub fn render_graph(db: &ChunkDb, graph_name: &str) -> String {
    let known = db.known_names();
    let mut dot = String::new();

    dot.push_str(&format!(
        "digraph \"{}\" {{\n",
        graph_name.replace('"', "\\\"")
    ));
    dot.push_str("  node [shape=record, fontname=\"sans-serif\"];\n");

    for (index, name) in known.iter().enumerate() {
        let title = wrap_label(name.as_str(), WRAP_WIDTH)
            .iter()
            .map(|l| escape_record(l))
            .collect::<Vec<_>>()
            .join("\\n");
        let blocks = db.block_list(name);
        let label = if blocks.len() > 1 {
            let ports = (0..blocks.len())
                .map(|i| format!("<b{}> {}", i, i + 1))
                .collect::<Vec<_>>()
                .join("|");
            format!("{{<all> {}|{{{}}}}}", title, ports)
        } else {
            format!("<all> {}", title)
        };

        let style = if db.is_root(name) {
            ", style=filled, fillcolor=lightgrey"
        } else {
            ""
        };
        dot.push_str(&format!(
            "  {} [label=\"{}\"{}];\n",
            node_id(index),
            label,
            style
        ));
    }

    for edge in db.back_refs() {
        if let Some(line) = render_edge(db, edge) {
            dot.push_str(&format!("  {};\n", line));
        }
    }

    dot.push_str("}\n");
    dot
}

/// `includer:all -> target:port`; the target port is the block matching
/// the includer's block number when the target has several blocks.
fn render_edge(db: &ChunkDb, edge: &BackRef) -> Option<String> {
    let known = db.known_names();
    let from = known.get_index_of(&edge.includer)?;
    let to = known.get_index_of(&edge.target)?;

    let target_blocks = db.block_list(&edge.target).len();
    let port = if target_blocks > 1 && edge.block < target_blocks {
        format!("b{}", edge.block)
    } else {
        "all".to_string()
    };
    Some(format!("{}:all -> {}:{}", node_id(from), node_id(to), port))
}

/// Writes the chunk graph of `db` to `sink`.
pub fn write_graph<W: Write + ?Sized>(db: &ChunkDb, graph_name: &str, sink: &mut W) -> Result<()> {
    sink.write_all(render_graph(db, graph_name).as_bytes())?;
    Ok(())
}
