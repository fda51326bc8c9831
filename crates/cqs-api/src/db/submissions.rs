//! Submission persistence operations.
//!
//! Rows in the `submissions` table are insert-only.

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use cqs_core::{Submission, SubmissionId};

/// Insert a finished submission.
pub async fn insert(pool: &PgPool, submission: &Submission) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO submissions (submission_id, client_id, created_at, answers, summary, report)
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(submission.submission_id.as_uuid())
    .bind(&submission.client_id)
    .bind(submission.created_at)
    .bind(Json(&submission.answers))
    .bind(Json(&submission.summary))
    .bind(&submission.report)
    .execute(pool)
    .await?;

    Ok(())
}

/// Load all submissions, oldest first, for hydration on startup.
///
/// A row whose stored snapshot no longer decodes fails the whole load.
pub async fn load_all(pool: &PgPool) -> Result<Vec<Submission>, sqlx::Error> {
    let rows = sqlx::query_as::<_, SubmissionRow>(
        "SELECT submission_id, client_id, created_at, answers, summary, report
         FROM submissions ORDER BY created_at",
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(SubmissionRow::into_record).collect()
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct SubmissionRow {
    submission_id: Uuid,
    client_id: String,
    created_at: DateTime<Utc>,
    answers: serde_json::Value,
    summary: serde_json::Value,
    report: String,
}

impl SubmissionRow {
    fn into_record(self) -> Result<Submission, sqlx::Error> {
        let answers = serde_json::from_value(self.answers);
        let summary = serde_json::from_value(self.summary);
        match (answers, summary) {
            (Ok(answers), Ok(summary)) => Ok(Submission {
                submission_id: SubmissionId::from_uuid(self.submission_id),
                client_id: self.client_id,
                created_at: self.created_at,
                answers,
                summary,
                report: self.report,
            }),
            (Err(e), _) | (_, Err(e)) => {
                tracing::error!(
                    submission_id = %self.submission_id,
                    error = %e,
                    "submission row has a malformed snapshot"
                );
                Err(sqlx::Error::Decode(
                    format!("submission {}: {e}", self.submission_id).into(),
                ))
            }
        }
    }
}
