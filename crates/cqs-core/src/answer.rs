//! # Answers
//!
//! An [`Answer`] is transient input: it is never persisted on its own, only as
//! part of a submission's verbatim answer snapshot. The submitted token is
//! kept as sent; [`AnswerValue`] is its normalized reading.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Normalized answer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerValue {
    Yes,
    No,
    /// Not applicable. Accepted as `na` or `n/a`.
    #[serde(rename = "na")]
    NotApplicable,
}

impl AnswerValue {
    /// Normalize a submitted token, case-insensitively and ignoring
    /// surrounding whitespace. Returns `None` for anything unrecognized.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "yes" => Some(Self::Yes),
            "no" => Some(Self::No),
            "na" | "n/a" => Some(Self::NotApplicable),
            _ => None,
        }
    }

    /// Canonical token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::NotApplicable => "na",
        }
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnswerValue {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ValidationError::InvalidAnswerValue(s.to_string()))
    }
}

/// A client's answer to one catalog question.
///
/// On the wire the token field is `answer`; `value` is accepted as an alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: String,
    #[serde(rename = "answer", alias = "value")]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Answer {
    pub fn new(question_id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            value: value.into(),
            notes: None,
        }
    }

    /// Attach notes (builder style).
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// The normalized token, or `None` if unrecognized.
    pub fn parsed(&self) -> Option<AnswerValue> {
        AnswerValue::parse(&self.value)
    }

    /// Notes, if present and non-empty.
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref().filter(|n| !n.is_empty())
    }
}
