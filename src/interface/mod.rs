//! High-level interface for litweave runs.

mod context;
mod document;

pub use context::Context;
pub use document::{
    process_document, tangle_document, write_document_graph, Document, RunPhases, RunReport,
};
