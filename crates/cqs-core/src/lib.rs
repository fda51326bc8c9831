//! # cqs-core: Foundational Types for the Compliance Questionnaire Service
//!
//! Every other crate in the workspace depends on `cqs-core`; it depends on
//! nothing internal.
//!
//! ## Contents
//!
//! - [`Question`]: a catalog entry, mapped to zero or more tracked standards.
//! - [`Answer`] / [`AnswerValue`]: a client's response to one question.
//! - [`StandardKey`] / [`TrackedStandards`]: the configured set of external
//!   control frameworks the engine evaluates.
//! - [`StandardSummary`] / [`ComplianceStatus`]: derived per-standard results.
//! - [`Submission`]: the immutable record of one evaluated answer set.
//! - [`CatalogRepository`] / [`SubmissionRepository`]: the storage seams,
//!   with the in-memory implementations [`MemoryCatalog`] and
//!   [`MemorySubmissions`].
//!
//! ## Crate Policy
//!
//! - No dependencies on other `cqs-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod answer;
pub mod error;
pub mod question;
pub mod standard;
pub mod store;
pub mod submission;
pub mod summary;

// Re-export primary types for ergonomic imports.
pub use answer::{Answer, AnswerValue};
pub use error::{StoreError, ValidationError};
pub use question::{AnswerType, Question, DEFAULT_ANSWER_TYPE};
pub use standard::{StandardKey, TrackedStandards, DEFAULT_STANDARDS};
pub use store::{
    CatalogRepository, MemoryCatalog, MemorySubmissions, SubmissionRepository, UpsertOutcome,
};
pub use submission::{Submission, SubmissionId};
pub use summary::{ComplianceStatus, ComplianceSummary, StandardSummary, StatusCounts};
