//! # cqs CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cqs_cli::catalog::{run_catalog, CatalogArgs};
use cqs_cli::evaluate::{run_evaluate, EvaluateArgs};
use cqs_cli::tracked_standards;

/// Compliance questionnaire CLI.
///
/// Imports question catalogs and evaluates answer sets against the tracked
/// standards, entirely in memory.
#[derive(Parser, Debug)]
#[command(name = "cqs", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Comma-separated standard columns to track, in report order.
    #[arg(long, global = true)]
    standards: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Import a catalog CSV and print per-standard question counts.
    Catalog(CatalogArgs),

    /// Evaluate an answer file into a summary or HTML report.
    Evaluate(EvaluateArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = tracked_standards(cli.standards.as_deref()).and_then(|standards| {
        match &cli.command {
            Commands::Catalog(args) => run_catalog(args, &standards),
            Commands::Evaluate(args) => run_evaluate(args, &standards),
        }
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
