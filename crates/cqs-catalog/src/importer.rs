//! # Merge-Upsert Importer
//!
//! Import is two-phase so a caller can persist the mapped batch elsewhere
//! (e.g. a database transaction) before the catalog is touched:
//!
//! 1. [`Importer::prepare`] maps records to questions. No mutation.
//! 2. [`Importer::commit`] merge-upserts the batch in one atomic call.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use cqs_core::{CatalogRepository, Question, StoreError, TrackedStandards, UpsertOutcome};

use crate::record::CatalogRecord;
use crate::source::read_csv;

/// Import failures.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The catalog source does not exist.
    #[error("catalog source not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    /// The source exists but could not be read.
    #[error("failed to read catalog source: {0}")]
    Io(#[from] std::io::Error),

    /// The source is not well-formed CSV.
    #[error("malformed catalog source: {0}")]
    Csv(#[from] csv::Error),

    /// The catalog store rejected the batch.
    #[error("catalog store error: {0}")]
    Store(#[from] StoreError),
}

impl ImportError {
    /// Whether this is the distinct "source not found" failure.
    pub fn is_source_not_found(&self) -> bool {
        matches!(self, Self::SourceNotFound { .. })
    }
}

/// Outcome counts of one import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportStats {
    pub inserted: usize,
    pub updated: usize,
}

impl ImportStats {
    /// Tally per-question upsert outcomes.
    pub fn from_outcomes(outcomes: &[UpsertOutcome]) -> Self {
        outcomes.iter().fold(Self::default(), |mut stats, outcome| {
            match outcome {
                UpsertOutcome::Inserted => stats.inserted += 1,
                UpsertOutcome::Updated => stats.updated += 1,
            }
            stats
        })
    }

    /// Rows applied.
    pub fn total(&self) -> usize {
        self.inserted + self.updated
    }
}

/// Maps catalog records onto questions for a fixed set of tracked standards.
#[derive(Debug, Clone, Copy)]
pub struct Importer<'a> {
    standards: &'a TrackedStandards,
}

impl<'a> Importer<'a> {
    pub fn new(standards: &'a TrackedStandards) -> Self {
        Self { standards }
    }

    /// Map records to questions, in input order, skipping blank ids.
    pub fn prepare<I>(&self, records: I) -> Vec<Question>
    where
        I: IntoIterator<Item = CatalogRecord>,
    {
        let mut skipped = 0usize;
        let questions: Vec<Question> = records
            .into_iter()
            .filter_map(|record| {
                let question = record.to_question(self.standards);
                if question.is_none() {
                    skipped += 1;
                }
                question
            })
            .collect();
        if skipped > 0 {
            tracing::debug!(skipped, "skipped catalog records without a question id");
        }
        questions
    }

    /// Merge-upsert a prepared batch into `catalog`.
    pub fn commit<C>(&self, catalog: &C, questions: Vec<Question>) -> Result<ImportStats, ImportError>
    where
        C: CatalogRepository + ?Sized,
    {
        let outcomes = catalog.upsert_batch(questions)?;
        let stats = ImportStats::from_outcomes(&outcomes);
        tracing::info!(
            inserted = stats.inserted,
            updated = stats.updated,
            catalog_size = catalog.len(),
            "catalog import complete"
        );
        Ok(stats)
    }

    /// [`prepare`](Self::prepare) then [`commit`](Self::commit).
    pub fn import<C, I>(&self, catalog: &C, records: I) -> Result<ImportStats, ImportError>
    where
        C: CatalogRepository + ?Sized,
        I: IntoIterator<Item = CatalogRecord>,
    {
        let questions = self.prepare(records);
        self.commit(catalog, questions)
    }
}

/// Import the CSV catalog at `path` into `catalog`.
pub fn import_csv<C>(
    path: &Path,
    standards: &TrackedStandards,
    catalog: &C,
) -> Result<ImportStats, ImportError>
where
    C: CatalogRepository + ?Sized,
{
    let records = read_csv(path)?;
    Importer::new(standards).import(catalog, records)
}
