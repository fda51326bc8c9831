//! # Catalog API
//!
//! Imports the configured catalog CSV and serves questions in catalog order.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use cqs_catalog::{read_csv, ImportError, ImportStats, Importer};
use cqs_core::{CatalogRepository, Question};

use crate::error::AppError;
use crate::extractors::extract_query;
use crate::state::AppState;

/// Pagination parameters for the question list.
#[derive(Debug, Deserialize, Default, ToSchema)]
pub struct ListParams {
    /// Number of questions to skip (default: 0).
    pub skip: Option<usize>,
    /// Maximum number of questions to return (default: 1000).
    pub limit: Option<usize>,
}

impl ListParams {
    const DEFAULT_LIMIT: usize = 1000;

    fn effective_skip(&self) -> usize {
        self.skip.unwrap_or(0)
    }

    fn effective_limit(&self) -> usize {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT)
    }
}

/// Outcome counts of a catalog import.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ImportResponse {
    pub inserted: usize,
    pub updated: usize,
}

impl From<ImportStats> for ImportResponse {
    fn from(stats: ImportStats) -> Self {
        Self {
            inserted: stats.inserted,
            updated: stats.updated,
        }
    }
}

/// Build the catalog router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/import-csv", post(import_catalog))
        .route("/questions", get(list_questions))
        .route("/questions/:question_id", get(get_question))
}

/// POST /import-csv: Merge-upsert the configured catalog CSV.
#[utoipa::path(
    post,
    path = "/import-csv",
    responses(
        (status = 200, description = "Catalog imported", body = ImportResponse),
        (status = 404, description = "Catalog source not found", body = crate::error::ErrorBody),
        (status = 500, description = "Import failed", body = crate::error::ErrorBody),
    ),
    tag = "catalog"
)]
async fn import_catalog(State(state): State<AppState>) -> Result<Json<ImportResponse>, AppError> {
    let _guard = state.import_lock.lock().await;

    // Parse and map off the async executor; nothing is mutated yet.
    let path = state.config.csv_path.clone();
    let standards = state.config.standards.clone();
    let questions = tokio::task::spawn_blocking(move || {
        let records = read_csv(&path)?;
        Ok::<_, ImportError>(Importer::new(&standards).prepare(records))
    })
    .await
    .map_err(|e| AppError::Internal(format!("import task failed: {e}")))??;

    // Persist to database first. A failure leaves the in-memory catalog untouched.
    if let Some(pool) = &state.db_pool {
        if let Err(e) = crate::db::questions::upsert_batch(pool, &questions).await {
            tracing::error!(error = %e, "failed to persist catalog import to database");
            return Err(AppError::Internal(format!(
                "catalog import database persist failed: {e}"
            )));
        }
    }

    let stats = Importer::new(&state.config.standards).commit(&state.catalog, questions)?;
    Ok(Json(stats.into()))
}

/// GET /questions: List questions in catalog order.
#[utoipa::path(
    get,
    path = "/questions",
    params(
        ("skip" = Option<usize>, Query, description = "Questions to skip (default 0)"),
        ("limit" = Option<usize>, Query, description = "Max questions to return (default 1000)"),
    ),
    responses(
        (status = 200, description = "Questions in catalog order"),
        (status = 400, description = "Malformed query parameters", body = crate::error::ErrorBody),
    ),
    tag = "catalog"
)]
async fn list_questions(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Question>>, AppError> {
    let params = extract_query(params)?;
    Ok(Json(
        state
            .catalog
            .list(params.effective_skip(), params.effective_limit()),
    ))
}

/// GET /questions/:question_id: Get one question.
#[utoipa::path(
    get,
    path = "/questions/{question_id}",
    params(("question_id" = String, Path, description = "Question ID")),
    responses(
        (status = 200, description = "Question found"),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "catalog"
)]
async fn get_question(
    State(state): State<AppState>,
    Path(question_id): Path<String>,
) -> Result<Json<Question>, AppError> {
    state
        .catalog
        .find(&question_id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("question {question_id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::state::AppConfig;

    fn state_with_csv(path: std::path::PathBuf) -> AppState {
        AppState::with_config(
            AppConfig {
                csv_path: path,
                ..AppConfig::default()
            },
            None,
        )
    }

    async fn body_json<T: serde::de::DeserializeOwned>(resp: axum::response::Response) -> T {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post(uri: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[test]
    fn list_params_defaults() {
        let params = ListParams::default();
        assert_eq!(params.effective_skip(), 0);
        assert_eq!(params.effective_limit(), 1000);
    }

    #[tokio::test]
    async fn import_missing_source_returns_404() {
        let dir = tempfile::tempdir().unwrap();
        let app = router().with_state(state_with_csv(dir.path().join("absent.csv")));

        let resp = app.oneshot(post("/import-csv")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn import_then_list_and_get() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("question.csv");
        std::fs::write(
            &path,
            "Question_ID,Question,IAM_Domain,GDPR\nQ-001,Do you have MFA?,Access Control,Art. 32\nQ-002,Is data encrypted?,Cryptography,\n",
        )
        .unwrap();
        let state = state_with_csv(path);
        let app = router().with_state(state.clone());

        let resp = app.clone().oneshot(post("/import-csv")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let stats: ImportResponse = body_json(resp).await;
        assert_eq!((stats.inserted, stats.updated), (2, 0));

        let resp = app.clone().oneshot(get("/questions?skip=1")).await.unwrap();
        let page: Vec<Question> = body_json(resp).await;
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].question_id, "Q-002");

        let resp = app.clone().oneshot(get("/questions/Q-001")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let q: Question = body_json(resp).await;
        assert_eq!(q.domain, "Access Control");

        let resp = app.oneshot(get("/questions/Q-999")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_query_returns_json_400() {
        let dir = tempfile::tempdir().unwrap();
        let app = router().with_state(state_with_csv(dir.path().join("question.csv")));

        for uri in ["/questions?limit=-1", "/questions?skip=abc"] {
            let resp = app.clone().oneshot(get(uri)).await.unwrap();
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
            let body: crate::error::ErrorBody = body_json(resp).await;
            assert_eq!(body.error.code, "VALIDATION_ERROR", "{uri}");
        }
    }
}
