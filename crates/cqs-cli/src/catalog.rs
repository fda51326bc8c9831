//! # Catalog Subcommand
//!
//! Imports a catalog CSV into a fresh in-memory catalog and prints import
//! stats plus, for each tracked standard, how many questions map to it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde_json::{json, Map, Value};

use cqs_catalog::import_csv;
use cqs_core::{CatalogRepository, MemoryCatalog, TrackedStandards};

/// Arguments for the `cqs catalog` subcommand.
#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Catalog CSV file.
    #[arg(value_name = "CSV")]
    pub path: PathBuf,
}

/// Execute the catalog subcommand.
pub fn run_catalog(args: &CatalogArgs, standards: &TrackedStandards) -> Result<u8> {
    let report = describe_catalog(&args.path, standards)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(0)
}

/// Import `path` and summarize the resulting catalog as JSON.
pub fn describe_catalog(path: &Path, standards: &TrackedStandards) -> Result<Value> {
    let catalog = MemoryCatalog::new();
    let stats = import_csv(path, standards, &catalog)
        .with_context(|| format!("failed to import {}", path.display()))?;

    let questions = catalog.snapshot();
    let mut coverage = Map::new();
    for key in standards {
        let relevant = questions.iter().filter(|q| q.is_relevant_to(key)).count();
        coverage.insert(key.to_string(), json!(relevant));
    }

    Ok(json!({
        "source": path.display().to_string(),
        "questions": questions.len(),
        "inserted": stats.inserted,
        "updated": stats.updated,
        "standards": coverage,
    }))
}
