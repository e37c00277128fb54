//! Process command: tangle, then weave.

use std::io::Write;
use std::path::PathBuf;

use crate::errors::Result;
use crate::interface::{Context, RunPhases};

use super::helpers::{print_reports, run_documents};

/// Options for the process command.
#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    /// Write the chunk graph regardless of configuration.
    pub graph: bool,
    /// Specific documents to process (empty means all).
    pub files: Vec<PathBuf>,
}

/// Executes the process command.
///
/// Roots mapped to `*` and the title report both go to standard output,
/// the report last.
pub fn process(ctx: &Context, options: ProcessOptions) -> Result<()> {
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    process_to(ctx, options, &mut lock)
}

/// Executes the process command with an explicit output stream.
pub fn process_to(ctx: &Context, options: ProcessOptions, out: &mut dyn Write) -> Result<()> {
    tracing::info!("Processing documents...");

    let phases = RunPhases {
        force_graph: options.graph,
        ..RunPhases::all()
    };
    let reports = run_documents(ctx, &options.files, phases, out)?;
    print_reports(&reports, out)
}
