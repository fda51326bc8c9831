//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! - **Catalog**: the question catalog, in catalog order.
//! - **Submissions**: issued submissions, keyed by id.
//! - **Database pool**: optional durable copy of both stores.
//! - **Config**: port, catalog source path, tracked standards.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use sqlx::PgPool;
use thiserror::Error;

use cqs_core::{
    CatalogRepository, MemoryCatalog, MemorySubmissions, SubmissionRepository, TrackedStandards,
    ValidationError,
};

/// Configuration errors, reported at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid PORT {value:?}: {reason}")]
    InvalidPort { value: String, reason: String },

    #[error("invalid CQS_STANDARDS: {0}")]
    InvalidStandards(#[from] ValidationError),
}

/// Application configuration.
///
/// Custom `Debug` redacts the database URL, which may carry credentials.
#[derive(Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Catalog CSV read by `POST /import-csv`.
    pub csv_path: PathBuf,
    /// Standards the importer maps and the engine evaluates, in report order.
    pub standards: TrackedStandards,
    /// Postgres connection string. `None` means in-memory only.
    pub database_url: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("csv_path", &self.csv_path)
            .field("standards", &self.standards)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            csv_path: default_csv_path(),
            standards: TrackedStandards::default(),
            database_url: None,
        }
    }
}

impl AppConfig {
    /// Build configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from a variable lookup. Unset or blank
    /// variables fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let port = match var("PORT") {
            Some(raw) => raw.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidPort {
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?,
            None => defaults.port,
        };
        let standards = match var("CQS_STANDARDS") {
            Some(raw) => TrackedStandards::parse(&raw)?,
            None => defaults.standards,
        };

        Ok(Self {
            port,
            csv_path: var("CSV_PATH").map(PathBuf::from).unwrap_or(defaults.csv_path),
            standards,
            database_url: var("DATABASE_URL"),
        })
    }
}

/// `backend/question.csv` when it exists, else `question.csv`.
pub fn default_csv_path() -> PathBuf {
    let nested = Path::new("backend").join("question.csv");
    if nested.exists() {
        nested
    } else {
        PathBuf::from("question.csv")
    }
}

/// Shared application state accessible to all route handlers.
///
/// Clone-friendly: the stores share their data through `Arc` internals.
#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: MemoryCatalog,
    pub submissions: MemorySubmissions,

    /// Serializes imports so the database and the in-memory catalog apply
    /// concurrent batches in the same order.
    pub import_lock: Arc<tokio::sync::Mutex<()>>,

    /// PostgreSQL connection pool. When `Some`, every write reaches the
    /// database before the in-memory store.
    pub db_pool: Option<PgPool>,

    pub config: AppConfig,
}

impl AppState {
    /// In-memory state with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default(), None)
    }

    /// State with the given configuration and optional database pool.
    pub fn with_config(config: AppConfig, db_pool: Option<PgPool>) -> Self {
        Self {
            catalog: MemoryCatalog::new(),
            submissions: MemorySubmissions::new(),
            import_lock: Arc::new(tokio::sync::Mutex::new(())),
            db_pool,
            config,
        }
    }

    /// Hydrate in-memory stores from the database.
    ///
    /// Called once on startup when a database pool is available.
    pub async fn hydrate_from_db(&self) -> Result<(), String> {
        let pool = match &self.db_pool {
            Some(pool) => pool,
            None => return Ok(()),
        };

        let questions = crate::db::questions::load_all(pool)
            .await
            .map_err(|e| format!("failed to load questions: {e}"))?;
        self.catalog
            .upsert_batch(questions)
            .map_err(|e| format!("failed to hydrate catalog: {e}"))?;

        let submissions = crate::db::submissions::load_all(pool)
            .await
            .map_err(|e| format!("failed to load submissions: {e}"))?;
        for submission in submissions {
            self.submissions
                .insert(submission)
                .map_err(|e| format!("failed to hydrate submissions: {e}"))?;
        }

        tracing::info!(
            questions = self.catalog.len(),
            submissions = self.submissions.len(),
            "Hydrated in-memory stores from database"
        );

        Ok(())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
