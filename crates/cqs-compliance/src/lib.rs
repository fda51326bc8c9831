//! # cqs-compliance: Compliance Status Engine
//!
//! A pure function from (catalog snapshot, answers, tracked standards) to a
//! per-standard [`StandardSummary`](cqs_core::StandardSummary). No clock, no
//! identifier generation, no I/O: the same inputs always produce the same
//! summary, which is what lets a submission freeze its result.
//!
//! ## Status Decision List
//!
//! Evaluated in order, first match wins:
//!
//! | Condition | Status |
//! |---|---|
//! | no relevant questions | `not_applicable` |
//! | any `no` | `non_compliant` |
//! | any `na` and every other relevant question `yes` | `partial` |
//! | every relevant question `yes` | `compliant` |
//! | otherwise | `unknown` |

pub mod engine;

pub use engine::{classify, evaluate, evaluate_standard, index_answers, AnswerIndex};
