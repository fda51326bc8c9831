//! # cqs-cli: CLI Tool for the Compliance Questionnaire
//!
//! Runs the catalog importer and the submission path against in-memory
//! stores, without the HTTP server or a database.
//!
//! ## Subcommands
//!
//! - `cqs catalog`: Import a catalog CSV and print per-standard coverage.
//! - `cqs evaluate`: Evaluate an answer file into a summary or HTML report.
//!
//! ```bash
//! cqs catalog backend/question.csv
//! cqs evaluate --catalog backend/question.csv --answers answers.json --format report
//! cqs --standards GDPR,HIPAA evaluate --catalog question.csv --answers answers.json
//! ```

pub mod catalog;
pub mod evaluate;

use anyhow::{Context, Result};

use cqs_core::TrackedStandards;

/// Resolve the tracked standards from a comma-separated list, falling back
/// to the built-in defaults.
pub fn tracked_standards(raw: Option<&str>) -> Result<TrackedStandards> {
    match raw {
        Some(list) => TrackedStandards::parse(list)
            .with_context(|| format!("invalid --standards value {list:?}")),
        None => Ok(TrackedStandards::default()),
    }
}
