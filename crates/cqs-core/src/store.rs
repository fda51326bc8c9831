//! # Repository Interfaces
//!
//! The catalog and submission stores are the only shared mutable resources.
//! Operations receive a repository explicitly; there is no process-wide
//! session.
//!
//! The in-memory implementations wrap their data in `Arc<parking_lot::RwLock<_>>`
//! so clones share state. Locks are never held across `.await` points, and
//! `parking_lot` locks do not poison, so a panicking writer cannot wedge a store.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::StoreError;
use crate::question::Question;
use crate::submission::{Submission, SubmissionId};

/// Result of merging one question into the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No question with the same id existed.
    Inserted,
    /// An existing question was overwritten in full.
    Updated,
}

/// Keyed store of catalog questions.
///
/// "Catalog order" is first-insertion order; overwriting a question keeps
/// its position.
pub trait CatalogRepository: Send + Sync {
    /// Exact lookup by question id.
    fn find(&self, question_id: &str) -> Option<Question>;

    /// A page of questions in catalog order.
    fn list(&self, skip: usize, limit: usize) -> Vec<Question>;

    /// Every question in catalog order, as of one instant.
    fn snapshot(&self) -> Vec<Question>;

    /// Merge-upsert a batch as one atomic unit, in input order.
    ///
    /// Returns one outcome per input question. Either every question is
    /// applied or, on error, none is.
    fn upsert_batch(&self, questions: Vec<Question>) -> Result<Vec<UpsertOutcome>, StoreError>;

    /// Number of questions.
    fn len(&self) -> usize;

    /// Whether the catalog is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Insert-only store of submissions.
pub trait SubmissionRepository: Send + Sync {
    /// Persist a new submission. Fails with [`StoreError::Duplicate`] if the
    /// id is already taken; stored submissions are never replaced.
    fn insert(&self, submission: Submission) -> Result<(), StoreError>;

    /// Exact lookup by id.
    fn get(&self, id: &SubmissionId) -> Option<Submission>;

    /// Number of stored submissions.
    fn len(&self) -> usize;

    /// Whether no submission is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// -- In-memory catalog --------------------------------------------------------

#[derive(Debug, Default)]
struct CatalogIndex {
    rows: Vec<Question>,
    positions: HashMap<String, usize>,
}

impl CatalogIndex {
    fn upsert(&mut self, question: Question) -> UpsertOutcome {
        match self.positions.get(&question.question_id) {
            Some(&pos) => {
                self.rows[pos].overwrite_from(question);
                UpsertOutcome::Updated
            }
            None => {
                self.positions
                    .insert(question.question_id.clone(), self.rows.len());
                self.rows.push(question);
                UpsertOutcome::Inserted
            }
        }
    }
}

/// Thread-safe, cloneable in-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    inner: Arc<RwLock<CatalogIndex>>,
}

impl MemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CatalogRepository for MemoryCatalog {
    fn find(&self, question_id: &str) -> Option<Question> {
        let index = self.inner.read();
        index
            .positions
            .get(question_id)
            .map(|&pos| index.rows[pos].clone())
    }

    fn list(&self, skip: usize, limit: usize) -> Vec<Question> {
        self.inner
            .read()
            .rows
            .iter()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect()
    }

    fn snapshot(&self) -> Vec<Question> {
        self.inner.read().rows.clone()
    }

    fn upsert_batch(&self, questions: Vec<Question>) -> Result<Vec<UpsertOutcome>, StoreError> {
        let mut index = self.inner.write();
        Ok(questions.into_iter().map(|q| index.upsert(q)).collect())
    }

    fn len(&self) -> usize {
        self.inner.read().rows.len()
    }
}

// -- In-memory submissions ----------------------------------------------------

/// Thread-safe, cloneable in-memory submission store.
#[derive(Debug, Clone, Default)]
pub struct MemorySubmissions {
    data: Arc<RwLock<HashMap<SubmissionId, Submission>>>,
}

impl MemorySubmissions {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SubmissionRepository for MemorySubmissions {
    fn insert(&self, submission: Submission) -> Result<(), StoreError> {
        let mut data = self.data.write();
        if data.contains_key(&submission.submission_id) {
            return Err(StoreError::Duplicate(submission.submission_id.to_string()));
        }
        data.insert(submission.submission_id, submission);
        Ok(())
    }

    fn get(&self, id: &SubmissionId) -> Option<Submission> {
        self.data.read().get(id).cloned()
    }

    fn len(&self) -> usize {
        self.data.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standard::StandardKey;
    use crate::summary::ComplianceSummary;
    use chrono::Utc;

    fn q(id: &str, text: &str) -> Question {
        Question::new(id, text)
    }

    #[test]
    fn upsert_inserts_then_updates() {
        let catalog = MemoryCatalog::new();
        let first = catalog
            .upsert_batch(vec![q("Q-001", "a"), q("Q-002", "b")])
            .unwrap();
        assert_eq!(first, vec![UpsertOutcome::Inserted, UpsertOutcome::Inserted]);

        let second = catalog
            .upsert_batch(vec![q("Q-001", "a2"), q("Q-002", "b")])
            .unwrap();
        assert_eq!(second, vec![UpsertOutcome::Updated, UpsertOutcome::Updated]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.find("Q-001").unwrap().question_text, "a2");
    }

    #[test]
    fn repeated_id_within_batch_counts_as_update() {
        let catalog = MemoryCatalog::new();
        let outcomes = catalog
            .upsert_batch(vec![q("Q-001", "a"), q("Q-001", "b")])
            .unwrap();
        assert_eq!(outcomes, vec![UpsertOutcome::Inserted, UpsertOutcome::Updated]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.find("Q-001").unwrap().question_text, "b");
    }

    #[test]
    fn overwrite_keeps_catalog_position() {
        let catalog = MemoryCatalog::new();
        catalog
            .upsert_batch(vec![q("Q-003", "c"), q("Q-001", "a"), q("Q-002", "b")])
            .unwrap();
        catalog.upsert_batch(vec![q("Q-001", "a2")]).unwrap();

        let ids: Vec<String> = catalog
            .snapshot()
            .into_iter()
            .map(|q| q.question_id)
            .collect();
        assert_eq!(ids, vec!["Q-003", "Q-001", "Q-002"]);
    }

    #[test]
    fn list_applies_skip_and_limit() {
        let catalog = MemoryCatalog::new();
        catalog
            .upsert_batch((1..=5).map(|i| q(&format!("Q-00{i}"), "t")).collect())
            .unwrap();
        let page: Vec<String> = catalog
            .list(1, 2)
            .into_iter()
            .map(|q| q.question_id)
            .collect();
        assert_eq!(page, vec!["Q-002", "Q-003"]);
        assert!(catalog.list(10, 5).is_empty());
        assert_eq!(catalog.list(0, 1000).len(), 5);
    }

    #[test]
    fn clones_share_state() {
        let catalog = MemoryCatalog::new();
        let other = catalog.clone();
        catalog.upsert_batch(vec![q("Q-001", "a")]).unwrap();
        assert!(other.find("Q-001").is_some());
    }

    #[test]
    fn snapshot_is_detached_from_later_writes() {
        let catalog = MemoryCatalog::new();
        let key = StandardKey::new("GDPR").unwrap();
        catalog
            .upsert_batch(vec![q("Q-001", "a").with_standard(key.clone(), "Art. 5")])
            .unwrap();
        let snap = catalog.snapshot();
        catalog.upsert_batch(vec![q("Q-001", "a")]).unwrap();
        assert!(snap[0].is_relevant_to(&key));
        assert!(!catalog.find("Q-001").unwrap().is_relevant_to(&key));
    }

    fn submission(id: SubmissionId) -> Submission {
        Submission {
            submission_id: id,
            client_id: "client".to_string(),
            created_at: Utc::now(),
            answers: Vec::new(),
            summary: ComplianceSummary::new(),
            report: String::new(),
        }
    }

    #[test]
    fn submissions_are_insert_only() {
        let store = MemorySubmissions::new();
        let id = SubmissionId::new();
        store.insert(submission(id)).unwrap();

        let mut replacement = submission(id);
        replacement.client_id = "other".to_string();
        assert_eq!(
            store.insert(replacement),
            Err(StoreError::Duplicate(id.to_string()))
        );
        assert_eq!(store.get(&id).unwrap().client_id, "client");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn missing_submission_is_none() {
        let store = MemorySubmissions::new();
        assert!(store.get(&SubmissionId::new()).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn concurrent_upserts_keep_one_entry_per_id() {
        const THREADS: usize = 8;
        const IDS: usize = 50;
        const ROUNDS: usize = 20;

        let catalog = MemoryCatalog::new();
        std::thread::scope(|scope| {
            for t in 0..THREADS {
                let catalog = catalog.clone();
                scope.spawn(move || {
                    for round in 0..ROUNDS {
                        let batch = (0..IDS)
                            .map(|i| q(&format!("Q-{i:03}"), &format!("t{t} r{round}")))
                            .collect();
                        let outcomes = catalog.upsert_batch(batch).unwrap();
                        assert_eq!(outcomes.len(), IDS);
                        assert!(catalog.len() <= IDS);
                    }
                });
            }
        });

        assert_eq!(catalog.len(), IDS);
        let ids: Vec<String> = catalog.snapshot().into_iter().map(|q| q.question_id).collect();
        let unique: std::collections::HashSet<&String> = ids.iter().collect();
        assert_eq!(ids.len(), IDS);
        assert_eq!(unique.len(), IDS);
        for (i, id) in ids.iter().enumerate() {
            assert_eq!(id, &format!("Q-{i:03}"));
        }

        // Each batch is applied under one write lock, so the last batch wins whole.
        let texts: std::collections::HashSet<String> =
            catalog.snapshot().into_iter().map(|q| q.question_text).collect();
        assert_eq!(texts.len(), 1);
    }
}
