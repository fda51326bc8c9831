//! # Error Types
//!
//! Errors shared by every crate in the workspace. Validation errors carry the
//! offending value so callers can report it verbatim; storage errors are
//! opaque to callers above the repository seam.

use thiserror::Error;

/// A value failed a domain validation rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Standard keys must be non-empty and contain no whitespace.
    #[error("invalid standard key: {0:?}")]
    InvalidStandardKey(String),

    /// A tracked-standards list resolved to zero entries.
    #[error("at least one tracked standard must be configured")]
    EmptyStandards,

    /// The answer token is not one of yes, no, na, n/a.
    #[error("invalid answer {0:?}: must be yes, no, or n/a")]
    InvalidAnswerValue(String),

    /// A submission identifier was not a UUID.
    #[error("invalid submission id: {0:?}")]
    InvalidSubmissionId(String),
}

/// Failure inside a repository implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A record with the same key already exists and the store is insert-only.
    #[error("duplicate key: {0}")]
    Duplicate(String),
}
