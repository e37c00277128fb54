//! Tangle command implementation.

use std::io::Write;
use std::path::PathBuf;

use crate::errors::Result;
use crate::interface::{Context, RunPhases};

use super::helpers::run_documents;

/// Options for the tangle command.
#[derive(Debug, Clone, Default)]
pub struct TangleOptions {
    /// Specific documents to tangle (empty means all).
    pub files: Vec<PathBuf>,
}

/// Executes the tangle command; roots mapped to `*` go to standard output.
pub fn tangle(ctx: &Context, options: TangleOptions) -> Result<()> {
    let stdout = std::io::stdout();
    tangle_to(ctx, options, &mut stdout.lock())
}

/// Executes the tangle command with an explicit primary stream.
pub fn tangle_to(ctx: &Context, options: TangleOptions, primary: &mut dyn Write) -> Result<()> {
    tracing::info!("Tangling documents...");

    let reports = run_documents(ctx, &options.files, RunPhases::tangle(), primary)?;
    let count: usize = reports.iter().map(|r| r.written.len()).sum();
    tracing::info!("Tangled {} roots from {} documents.", count, reports.len());
    Ok(())
}
