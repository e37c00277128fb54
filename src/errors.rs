//! Error types for litweave.

use thiserror::Error;

use crate::model::ChunkName;
use crate::text_location::TextLocation;

/// Main error type for litweave operations.
#[derive(Error, Debug)]
pub enum LitweaveError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("Parse error at {location}: {message}")]
    Parse { location: TextLocation, message: String },

    #[error("No chunk {0}")]
    NoSuchChunk(String),

    #[error("Chunk title {title} is not unique (matches {candidates:?})")]
    AmbiguousTitle {
        title: String,
        candidates: Vec<ChunkName>,
    },

    #[error("Duplicate root chunk for {0}")]
    DuplicateRoot(ChunkName),

    #[error("Chunk {0} is declared both as a root and as an ordinary chunk")]
    KindConflict(ChunkName),

    #[error("Recursive reference: {}", format_cycle(.0))]
    CycleDetected(Vec<ChunkName>),

    #[error("Found reference to undefined chunk {0}")]
    UndefinedChunk(ChunkName),

    #[error("Output file {file} for root {root} collides with another output")]
    FilenameCollision { file: String, root: ChunkName },

    #[error("{0}")]
    Other(String),
}

fn format_cycle(path: &[ChunkName]) -> String {
    path.iter()
        .map(|n| n.as_str())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Result type alias for litweave operations.
pub type Result<T> = std::result::Result<T, LitweaveError>;
