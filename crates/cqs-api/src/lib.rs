//! # cqs-api: Axum HTTP Service for the Compliance Questionnaire
//!
//! Imports the question catalog from CSV, accepts client answer sets,
//! and serves the immutable summary and HTML report of each submission.
//!
//! ## API Surface
//!
//! | Path                                   | Module                    | Domain        |
//! |----------------------------------------|---------------------------|---------------|
//! | `/import-csv`                          | [`routes::catalog`]       | Catalog       |
//! | `/questions`, `/questions/:id`         | [`routes::catalog`]       | Catalog       |
//! | `/submit`                              | [`routes::submissions`]   | Submissions   |
//! | `/report/:id`                          | [`routes::submissions`]   | Submissions   |
//! | `/standards/summary/:id`               | [`routes::submissions`]   | Submissions   |
//! | `/openapi.json`                        | [`openapi`]               | Documentation |
//! | `/health`, `/health/*`, `/metrics`     | this module               | Operations    |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! CorsLayer → TraceLayer → MetricsMiddleware → Handler
//! ```

pub mod db;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use cqs_core::{CatalogRepository, SubmissionRepository};

use crate::middleware::metrics::ApiMetrics;
use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let metrics = ApiMetrics::new();

    // Body size limit: 2 MiB.
    let api = Router::new()
        .merge(routes::catalog::router())
        .merge(routes::submissions::router())
        .merge(openapi::router())
        .layer(DefaultBodyLimit::max(2 * 1024 * 1024))
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(Extension(metrics.clone()))
        .with_state(state.clone());

    let probes = Router::new()
        .route("/health", get(health))
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .route("/metrics", get(prometheus_metrics))
        .layer(Extension(metrics))
        .with_state(state);

    Router::new()
        .merge(probes)
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// GET /metrics: Prometheus metrics scrape endpoint.
///
/// Refreshes the store gauges from `AppState`, then encodes every metric in
/// Prometheus text exposition format.
async fn prometheus_metrics(
    State(state): State<AppState>,
    Extension(metrics): Extension<ApiMetrics>,
) -> impl IntoResponse {
    metrics.set_store_sizes(state.catalog.len(), state.submissions.len());

    match metrics.gather_and_encode() {
        Ok(body) => (
            StatusCode::OK,
            [(
                axum::http::header::CONTENT_TYPE,
                "text/plain; version=0.0.4; charset=utf-8",
            )],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to encode Prometheus metrics: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, e).into_response()
        }
    }
}

/// Health check with a JSON body.
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Liveness probe: always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: returns 200 "ready", or 503 when the configured
/// database does not answer.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    if let Some(pool) = &state.db_pool {
        if let Err(e) = sqlx::query("SELECT 1").execute(pool).await {
            tracing::warn!("Database health check failed: {e}");
            return (StatusCode::SERVICE_UNAVAILABLE, "database unreachable").into_response();
        }
    }

    (StatusCode::OK, "ready").into_response()
}
