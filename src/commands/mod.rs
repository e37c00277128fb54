//! Command implementations.

mod helpers;
mod process;
mod tangle;
mod weave;

pub use helpers::{run_documents, selected_documents};
pub use process::{process, process_to, ProcessOptions};
pub use tangle::{tangle, tangle_to, TangleOptions};
pub use weave::{weave, weave_to, WeaveOptions};
