//! litweave CLI - literate programming with AsciiDoc

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use litweave::commands;
use litweave::interface::Context;

#[derive(Parser)]
#[command(name = "litweave")]
#[command(author, version, about = "Literate programming engine for AsciiDoc", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    directory: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write root chunks to their output files
    Tangle {
        /// Specific documents to tangle
        #[arg(value_name = "FILE")]
        files: Vec<PathBuf>,
    },

    /// Add navigation links to chunk blocks and print the title report
    Weave {
        /// Write the chunk dependency graph
        #[arg(short, long)]
        graph: bool,

        /// Specific documents to weave
        #[arg(value_name = "FILE")]
        files: Vec<PathBuf>,
    },

    /// Tangle, then weave
    Process {
        /// Write the chunk dependency graph
        #[arg(short, long)]
        graph: bool,

        /// Specific documents to process
        #[arg(value_name = "FILE")]
        files: Vec<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries tangled output and reports
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let base_dir = cli
        .directory
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let config = match cli.config {
        Some(ref path) => litweave::config::read_config_file(path),
        None => litweave::config::read_config(&base_dir),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error reading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let ctx = Context::new(config, base_dir);

    let result = match cli.command {
        Commands::Tangle { files } => commands::tangle(&ctx, commands::TangleOptions { files }),

        Commands::Weave { graph, files } => {
            commands::weave(&ctx, commands::WeaveOptions { graph, files })
        }

        Commands::Process { graph, files } => {
            commands::process(&ctx, commands::ProcessOptions { graph, files })
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
