//! # Evaluate Subcommand
//!
//! Imports a catalog CSV, then runs an answer file through the same
//! validate, evaluate, and render path the server uses for `POST /submit`.
//!
//! The answer file is either a bare list of answers or a submit request
//! body:
//!
//! ```json
//! {"client_id": "acme", "answers": [{"question_id": "Q-001", "answer": "yes"}]}
//! ```
//!
//! Exit codes: 0 on success, 2 when the answers fail validation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Deserialize;

use cqs_catalog::import_csv;
use cqs_core::{Answer, MemoryCatalog, MemorySubmissions, Submission, TrackedStandards};
use cqs_report::Submitter;

/// Client id used when neither the flag nor the answer file names one.
const DEFAULT_CLIENT_ID: &str = "cli";

/// What `cqs evaluate` prints.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Per-standard summary as JSON.
    #[default]
    Summary,
    /// Rendered HTML report.
    Report,
}

/// Arguments for the `cqs evaluate` subcommand.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Catalog CSV file.
    #[arg(long)]
    pub catalog: PathBuf,

    /// JSON answer file.
    #[arg(long)]
    pub answers: PathBuf,

    /// Client id; overrides the one in the answer file.
    #[arg(long)]
    pub client_id: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Summary)]
    pub format: OutputFormat,

    /// Write output to this file instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AnswerFile {
    Bare(Vec<Answer>),
    Request {
        #[serde(default)]
        client_id: Option<String>,
        answers: Vec<Answer>,
    },
}

impl AnswerFile {
    fn into_parts(self) -> (Option<String>, Vec<Answer>) {
        match self {
            Self::Bare(answers) => (None, answers),
            Self::Request { client_id, answers } => (client_id, answers),
        }
    }
}

/// Execute the evaluate subcommand.
pub fn run_evaluate(args: &EvaluateArgs, standards: &TrackedStandards) -> Result<u8> {
    let catalog = MemoryCatalog::new();
    import_csv(&args.catalog, standards, &catalog)
        .with_context(|| format!("failed to import {}", args.catalog.display()))?;

    let (file_client_id, answers) = read_answers(&args.answers)?;
    let client_id = args
        .client_id
        .clone()
        .or(file_client_id)
        .unwrap_or_else(|| DEFAULT_CLIENT_ID.to_string());

    let submission = match Submitter::new(standards).submit(
        &catalog,
        &MemorySubmissions::new(),
        client_id,
        answers,
    ) {
        Ok(submission) => submission,
        Err(e) if e.is_validation() => {
            eprintln!("answers rejected: {e}");
            return Ok(2);
        }
        Err(e) => return Err(e).context("submission failed"),
    };

    let rendered = render(&submission, args.format)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "output written");
        }
        None => println!("{rendered}"),
    }
    Ok(0)
}

fn read_answers(path: &Path) -> Result<(Option<String>, Vec<Answer>)> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let file: AnswerFile = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a valid answer file", path.display()))?;
    Ok(file.into_parts())
}

fn render(submission: &Submission, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Summary => Ok(serde_json::to_string_pretty(&submission.summary)?),
        OutputFormat::Report => Ok(submission.report.clone()),
    }
}
