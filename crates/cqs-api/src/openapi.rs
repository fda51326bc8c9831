//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI document.
//! Serves at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Compliance Questionnaire Service",
        version = "0.1.0",
        description = "Imports a compliance question catalog, accepts client answer sets, and issues immutable per-standard compliance summaries with HTML reports.\n\nHealth probes (`/health/*`) and `/metrics` are served alongside the API."
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    paths(
        // ── Catalog ──────────────────────────────────────────────────────
        crate::routes::catalog::import_catalog,
        crate::routes::catalog::list_questions,
        crate::routes::catalog::get_question,
        // ── Submissions ──────────────────────────────────────────────────
        crate::routes::submissions::submit_answers,
        crate::routes::submissions::get_report,
        crate::routes::submissions::get_summary,
    ),
    components(
        schemas(
            crate::error::ErrorBody,
            crate::error::ErrorDetail,
            crate::routes::catalog::ListParams,
            crate::routes::catalog::ImportResponse,
            crate::routes::submissions::SubmitRequest,
            crate::routes::submissions::SubmitResponse,
        ),
    ),
    tags(
        (name = "catalog", description = "Catalog import and question lookup"),
        (name = "submissions", description = "Answer submission, HTML reports, and per-standard summaries"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json: Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
