//! # Submission API
//!
//! Accepts answer sets, evaluates them against the current catalog, and
//! serves the frozen report and summary of each issued submission.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use cqs_core::{Answer, CatalogRepository, ComplianceSummary, Submission, SubmissionId};
use cqs_report::{get_submission, Submitter};

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

/// Answers submitted by one client.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmitRequest {
    pub client_id: String,
    /// `[{"question_id": "...", "answer": "yes|no|n/a", "notes": "..."}]`
    #[schema(value_type = Vec<Object>)]
    pub answers: Vec<Answer>,
}

/// An issued submission.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmitResponse {
    pub submission_id: Uuid,
    pub client_id: String,
    pub created_at: DateTime<Utc>,
    /// Standard key → `{status, counts, na_notes}`.
    #[schema(value_type = Object)]
    pub summary: ComplianceSummary,
    pub report_html: String,
}

impl From<Submission> for SubmitResponse {
    fn from(s: Submission) -> Self {
        Self {
            submission_id: *s.submission_id.as_uuid(),
            client_id: s.client_id,
            created_at: s.created_at,
            summary: s.summary,
            report_html: s.report,
        }
    }
}

/// Build the submissions router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/submit", post(submit_answers))
        .route("/report/:submission_id", get(get_report))
        .route("/standards/summary/:submission_id", get(get_summary))
}

/// POST /submit: Validate, evaluate, and store an answer set.
#[utoipa::path(
    post,
    path = "/submit",
    request_body = SubmitRequest,
    responses(
        (status = 200, description = "Submission created", body = SubmitResponse),
        (status = 400, description = "Unknown question id or answer token", body = crate::error::ErrorBody),
        (status = 422, description = "Malformed request body", body = crate::error::ErrorBody),
    ),
    tag = "submissions"
)]
async fn submit_answers(
    State(state): State<AppState>,
    body: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<Json<SubmitResponse>, AppError> {
    let req = extract_json(body)?;
    let submitter = Submitter::new(&state.config.standards);

    let snapshot = state.catalog.snapshot();
    let submission = submitter.prepare(&snapshot, req.client_id, req.answers)?;

    // Persist to database first. A failure leaves no trace in memory.
    if let Some(pool) = &state.db_pool {
        if let Err(e) = crate::db::submissions::insert(pool, &submission).await {
            tracing::error!(
                submission_id = %submission.submission_id,
                error = %e,
                "failed to persist submission to database"
            );
            return Err(AppError::Internal(format!(
                "submission database persist failed: {e}"
            )));
        }
    }

    let submission = submitter.commit(&state.submissions, submission)?;
    Ok(Json(submission.into()))
}

/// GET /report/:submission_id: The stored HTML report.
#[utoipa::path(
    get,
    path = "/report/{submission_id}",
    params(("submission_id" = String, Path, description = "Submission ID")),
    responses(
        (status = 200, description = "HTML report", content_type = "text/html"),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "submissions"
)]
async fn get_report(
    State(state): State<AppState>,
    Path(submission_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let submission = lookup(&state, &submission_id)?;
    Ok(Html(submission.report))
}

/// GET /standards/summary/:submission_id: The stored per-standard summary.
#[utoipa::path(
    get,
    path = "/standards/summary/{submission_id}",
    params(("submission_id" = String, Path, description = "Submission ID")),
    responses(
        (status = 200, description = "Standard key → summary"),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "submissions"
)]
async fn get_summary(
    State(state): State<AppState>,
    Path(submission_id): Path<String>,
) -> Result<Json<ComplianceSummary>, AppError> {
    let submission = lookup(&state, &submission_id)?;
    Ok(Json(submission.summary))
}

/// Any id that is not a stored submission is a 404, including a malformed one.
fn lookup(state: &AppState, raw_id: &str) -> Result<Submission, AppError> {
    let id: SubmissionId = raw_id
        .parse()
        .map_err(|_| AppError::NotFound(format!("submission {raw_id} not found")))?;
    Ok(get_submission(&state.submissions, &id)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use cqs_core::{Question, StandardKey, SubmissionRepository, TrackedStandards};

    use crate::state::AppConfig;

    fn test_state() -> AppState {
        let state = AppState::with_config(
            AppConfig {
                standards: TrackedStandards::parse("S").unwrap(),
                ..AppConfig::default()
            },
            None,
        );
        let s = StandardKey::new("S").unwrap();
        state
            .catalog
            .upsert_batch(vec![
                Question::new("Q-001", "first").with_standard(s.clone(), "S-1"),
                Question::new("Q-002", "second").with_standard(s, "S-2"),
            ])
            .unwrap();
        state
    }

    fn submit(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/submit")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_bytes(resp: axum::response::Response) -> Vec<u8> {
        resp.into_body().collect().await.unwrap().to_bytes().to_vec()
    }

    #[tokio::test]
    async fn submit_returns_summary_and_report() {
        let state = test_state();
        let app = router().with_state(state.clone());

        let resp = app
            .oneshot(submit(
                r#"{"client_id":"c1","answers":[{"question_id":"Q-001","answer":"yes"},{"question_id":"Q-002","answer":"N/A","notes":"not needed"}]}"#,
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body: SubmitResponse = serde_json::from_slice(&body_bytes(resp).await).unwrap();
        let s = StandardKey::new("S").unwrap();
        assert_eq!(body.client_id, "c1");
        assert_eq!(body.summary[&s].na_notes, vec!["Q-002: not needed"]);
        assert!(body.report_html.contains("Executive Summary"));
        assert_eq!(state.submissions.len(), 1);
    }

    #[tokio::test]
    async fn invalid_question_returns_400_and_stores_nothing() {
        let state = test_state();
        let app = router().with_state(state.clone());

        let resp = app
            .oneshot(submit(
                r#"{"client_id":"c1","answers":[{"question_id":"Q-001","answer":"yes"},{"question_id":"INVALID","answer":"yes"}]}"#,
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_slice(&body_bytes(resp).await).unwrap();
        assert!(body["error"]["message"].as_str().unwrap().contains("INVALID"));
        assert!(state.submissions.is_empty());
    }

    #[tokio::test]
    async fn malformed_body_returns_422() {
        let app = router().with_state(test_state());
        let resp = app.oneshot(submit(r#"{"answers": "nope"}"#)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn report_is_html() {
        let state = test_state();
        let submission = Submitter::new(&state.config.standards)
            .submit(&state.catalog, &state.submissions, "c1", vec![])
            .unwrap();
        let app = router().with_state(state);

        let resp = app
            .oneshot(
                Request::builder()
                    .uri(format!("/report/{}", submission.submission_id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let content_type = resp.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/html"));
        let html = String::from_utf8(body_bytes(resp).await).unwrap();
        assert_eq!(html, submission.report);
    }

    #[tokio::test]
    async fn non_uuid_id_returns_404() {
        let app = router().with_state(test_state());
        for uri in ["/report/not-a-uuid", "/standards/summary/not-a-uuid"] {
            let resp = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
        }
    }

    #[tokio::test]
    async fn unknown_id_returns_404() {
        let app = router().with_state(test_state());
        let resp = app
            .oneshot(
                Request::builder()
                    .uri(format!("/standards/summary/{}", Uuid::new_v4()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
