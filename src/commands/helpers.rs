//! Shared command helpers.

use std::io::Write;
use std::path::PathBuf;

use crate::errors::Result;
use crate::interface::{process_document, Context, Document, RunPhases, RunReport};

/// The documents a command works on: `files` if given, else every document
/// matching the configured source patterns.
pub fn selected_documents(ctx: &Context, files: &[PathBuf]) -> Result<Vec<PathBuf>> {
    if files.is_empty() {
        ctx.source_files()
    } else {
        Ok(files.to_vec())
    }
}

/// Runs `phases` over each document in turn, stopping at the first error.
pub fn run_documents(
    ctx: &Context,
    files: &[PathBuf],
    phases: RunPhases,
    primary: &mut dyn Write,
) -> Result<Vec<RunReport>> {
    let paths = selected_documents(ctx, files)?;
    if paths.is_empty() {
        tracing::info!("No documents found.");
    }

    let mut reports = Vec::with_capacity(paths.len());
    for path in &paths {
        let mut doc = Document::load(path, ctx)?;
        reports.push(process_document(&mut doc, phases, primary)?);
    }
    Ok(reports)
}

/// Prints the reports as a JSON array.
pub(crate) fn print_reports(reports: &[RunReport], out: &mut dyn Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, reports)?;
    writeln!(out)?;
    Ok(())
}
