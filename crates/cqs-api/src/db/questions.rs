//! Catalog persistence operations.
//!
//! All functions take a `&PgPool` and operate on the `questions` table.

use sqlx::types::Json;
use sqlx::PgPool;

use cqs_core::{AnswerType, Question};

/// Merge-upsert a batch of questions in one transaction.
///
/// Rows are written in batch order, so a question repeated in the batch
/// ends with its last version. An existing row keeps its `seq`.
pub async fn upsert_batch(pool: &PgPool, questions: &[Question]) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    for question in questions {
        sqlx::query(
            "INSERT INTO questions (question_id, question_text, domain, sub_domain,
             answer_type, notes, standards, meta)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             ON CONFLICT (question_id) DO UPDATE SET
                question_text = EXCLUDED.question_text,
                domain = EXCLUDED.domain,
                sub_domain = EXCLUDED.sub_domain,
                answer_type = EXCLUDED.answer_type,
                notes = EXCLUDED.notes,
                standards = EXCLUDED.standards,
                meta = EXCLUDED.meta,
                updated_at = now()",
        )
        .bind(&question.question_id)
        .bind(&question.question_text)
        .bind(&question.domain)
        .bind(&question.sub_domain)
        .bind(question.answer_type.as_str())
        .bind(&question.notes)
        .bind(Json(&question.standards))
        .bind(&question.meta)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}

/// Load the whole catalog in catalog order, for hydration on startup.
///
/// A row that no longer decodes fails the whole load.
pub async fn load_all(pool: &PgPool) -> Result<Vec<Question>, sqlx::Error> {
    let rows = sqlx::query_as::<_, QuestionRow>(
        "SELECT question_id, question_text, domain, sub_domain, answer_type,
         notes, standards, meta
         FROM questions ORDER BY seq",
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(QuestionRow::into_record).collect()
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct QuestionRow {
    question_id: String,
    question_text: String,
    domain: String,
    sub_domain: String,
    answer_type: String,
    notes: String,
    standards: serde_json::Value,
    meta: serde_json::Value,
}

impl QuestionRow {
    fn into_record(self) -> Result<Question, sqlx::Error> {
        let standards = serde_json::from_value(self.standards).map_err(|e| {
            tracing::error!(
                question_id = %self.question_id,
                error = %e,
                "question row has a malformed standards mapping"
            );
            sqlx::Error::Decode(format!("question {}: {e}", self.question_id).into())
        })?;
        Ok(Question {
            question_id: self.question_id,
            question_text: self.question_text,
            domain: self.domain,
            sub_domain: self.sub_domain,
            answer_type: AnswerType::parse_or_default(&self.answer_type),
            notes: self.notes,
            standards,
            meta: self.meta,
        })
    }
}
