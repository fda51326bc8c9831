//! Submit and look up submissions.

use chrono::Utc;

use cqs_core::{
    Answer, CatalogRepository, Question, Submission, SubmissionId, SubmissionRepository,
    TrackedStandards,
};

use crate::error::SubmissionError;
use crate::render::render_report;
use crate::validate::validate_answers;

/// Evaluates and records submissions for a fixed set of tracked standards.
#[derive(Debug, Clone, Copy)]
pub struct Submitter<'a> {
    standards: &'a TrackedStandards,
}

impl<'a> Submitter<'a> {
    pub fn new(standards: &'a TrackedStandards) -> Self {
        Self { standards }
    }

    /// Build a finished submission from a catalog snapshot. No mutation.
    ///
    /// Fails with the first invalid answer; on success the summary and
    /// report are both filled in.
    pub fn prepare(
        &self,
        catalog: &[Question],
        client_id: impl Into<String>,
        answers: Vec<Answer>,
    ) -> Result<Submission, SubmissionError> {
        let client_id = client_id.into();
        if let Err(err) = validate_answers(catalog, &answers) {
            tracing::debug!(client_id = %client_id, error = %err, "submission rejected");
            return Err(err);
        }

        let summary = cqs_compliance::evaluate(catalog, &answers, self.standards.as_slice());
        let mut submission = Submission {
            submission_id: SubmissionId::new(),
            client_id,
            created_at: Utc::now(),
            answers,
            summary,
            report: String::new(),
        };
        submission.report = render_report(&submission, catalog, self.standards.as_slice());
        Ok(submission)
    }

    /// Store a prepared submission.
    pub fn commit<S>(&self, submissions: &S, submission: Submission) -> Result<Submission, SubmissionError>
    where
        S: SubmissionRepository + ?Sized,
    {
        submissions.insert(submission.clone())?;
        tracing::info!(
            submission_id = %submission.submission_id,
            client_id = %submission.client_id,
            answers = submission.answers.len(),
            "submission created"
        );
        Ok(submission)
    }

    /// Snapshot `catalog`, then [`prepare`](Self::prepare) and
    /// [`commit`](Self::commit).
    pub fn submit<C, S>(
        &self,
        catalog: &C,
        submissions: &S,
        client_id: impl Into<String>,
        answers: Vec<Answer>,
    ) -> Result<Submission, SubmissionError>
    where
        C: CatalogRepository + ?Sized,
        S: SubmissionRepository + ?Sized,
    {
        let snapshot = catalog.snapshot();
        let submission = self.prepare(&snapshot, client_id, answers)?;
        self.commit(submissions, submission)
    }
}

/// Exact lookup of a stored submission.
pub fn get_submission<S>(submissions: &S, id: &SubmissionId) -> Result<Submission, SubmissionError>
where
    S: SubmissionRepository + ?Sized,
{
    submissions
        .get(id)
        .ok_or_else(|| SubmissionError::NotFound(id.to_string()))
}
