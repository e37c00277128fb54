//! litweave - Literate Programming Engine
//!
//! Code lives in named chunks spread over the listing blocks of an AsciiDoc
//! document. Chunks reference each other with `<<title>>` lines, titles may
//! be abbreviated with a trailing `...`, and root chunks name output files.
//!
//! # Features
//!
//! - **Tangle**: Expand root chunks into source files, with optional
//!   `#line`-style position directives per language
//! - **Weave**: Link every chunk block to the blocks that include it and to
//!   its neighbouring blocks, and draw the chunk graph in DOT format
//!
//! # Example
//!
//! ```no_run
//! use litweave::interface::Context;
//! use litweave::commands::{tangle, TangleOptions};
//!
//! let ctx = Context::from_current_dir().unwrap();
//! tangle(&ctx, TangleOptions::default()).unwrap();
//! ```

pub mod commands;
pub mod config;
pub mod errors;
pub mod interface;
pub mod io;
pub mod model;
pub mod readers;
pub mod text_location;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types
pub use config::Config;
pub use errors::{LitweaveError, Result};
pub use interface::Context;
pub use model::{Block, ChunkDb, ChunkName, SourceBlock, Tangler};

// Re-export command options
pub use commands::{ProcessOptions, TangleOptions, WeaveOptions};
