//! # Per-Standard Summaries
//!
//! Derived results of the compliance status engine. A summary is computed
//! once per submission and frozen with it; it is never persisted on its own.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::standard::StandardKey;

/// Compliance classification of one standard for one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    /// Every relevant question answered yes.
    Compliant,
    /// At least one relevant question answered no.
    NonCompliant,
    /// No no answers, nothing unanswered, at least one n/a.
    Partial,
    /// The catalog maps no question to the standard.
    NotApplicable,
    /// Anything else, typically unanswered questions.
    Unknown,
}

impl ComplianceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compliant => "compliant",
            Self::NonCompliant => "non_compliant",
            Self::Partial => "partial",
            Self::NotApplicable => "not_applicable",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Answer tallies over the questions relevant to one standard.
///
/// `yes + no + na + unanswered == total` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub total: usize,
    pub yes: usize,
    pub no: usize,
    pub na: usize,
    pub unanswered: usize,
}

/// Summary of one standard for one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardSummary {
    pub status: ComplianceStatus,
    pub counts: StatusCounts,
    /// `"<question_id>: <notes>"` for every n/a answer with notes, in catalog order.
    pub na_notes: Vec<String>,
}

impl StandardSummary {
    /// Summary for a standard no catalog question maps to.
    pub fn not_applicable() -> Self {
        Self {
            status: ComplianceStatus::NotApplicable,
            counts: StatusCounts::default(),
            na_notes: Vec::new(),
        }
    }
}

/// Standard key → summary, for every tracked standard.
pub type ComplianceSummary = BTreeMap<StandardKey, StandardSummary>;
