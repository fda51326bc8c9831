//! # cqs-report: Submissions and Compliance Reports
//!
//! A submission is evaluated once and frozen. The flow mirrors the catalog
//! importer's prepare/commit split:
//!
//! 1. [`Submitter::prepare`] validates every answer against a catalog
//!    snapshot, assigns an id and timestamp, evaluates the summary and
//!    renders the report. Nothing is mutated; any invalid answer rejects
//!    the whole submission.
//! 2. [`Submitter::commit`] inserts the finished [`Submission`] as one unit.
//!
//! Stored submissions are never recomputed. Re-importing the catalog later
//! does not change a report that was already issued.
//!
//! [`Submission`]: cqs_core::Submission

pub mod error;
pub mod render;
pub mod service;
pub mod validate;

pub use error::SubmissionError;
pub use render::{escape_html, render_report};
pub use service::{get_submission, Submitter};
pub use validate::validate_answers;
