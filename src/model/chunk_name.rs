//! Chunk names and abbreviated title resolution.

use std::fmt;

use indexmap::IndexSet;
use serde::Serialize;

use crate::config::ELLIPSIS;
use crate::errors::{LitweaveError, Result};

/// A chunk name identifies an ordinary or root chunk.
///
/// Ordinary chunks are usually named by prose titles (`Parse the input`),
/// roots by the output file they produce (`main.c`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ChunkName(String);

impl ChunkName {
    /// Creates a new ChunkName from a string.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Headerless chunk convention: a name without spaces is an output file.
    pub fn looks_like_file(&self) -> bool {
        !self.0.contains(' ')
    }
}

impl fmt::Display for ChunkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ChunkName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ChunkName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ChunkName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Every chunk name seen so far, defined or referenced, in first-seen order.
pub type KnownNames = IndexSet<ChunkName>;

/// Expands a possibly abbreviated title to the unique known full title.
///
/// Titles without the trailing `...` come back unchanged, known or not.
pub fn resolve(title: &str, known: &KnownNames) -> Result<ChunkName> {
    let Some(prefix) = title.strip_suffix(ELLIPSIS) else {
        return Ok(ChunkName::new(title));
    };

    let mut hits = known.iter().filter(|name| name.as_str().starts_with(prefix));
    match (hits.next(), hits.next()) {
        (None, _) => Err(LitweaveError::NoSuchChunk(title.to_string())),
        (Some(only), None) => Ok(only.clone()),
        (Some(first), Some(second)) => {
            let mut candidates = vec![first.clone(), second.clone()];
            candidates.extend(hits.cloned());
            Err(LitweaveError::AmbiguousTitle {
                title: title.to_string(),
                candidates,
            })
        }
    }
}
