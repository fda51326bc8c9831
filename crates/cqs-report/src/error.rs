//! Submission errors.

use thiserror::Error;

use cqs_core::StoreError;

/// Errors from submitting answers or looking up a submission.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// An answer references a question that is not in the catalog.
    #[error("invalid question_id: {0}")]
    UnknownQuestion(String),

    /// An answer token is not one of yes, no, n/a.
    #[error("invalid answer for {question_id}: {value}. Must be yes, no, or n/a")]
    InvalidAnswer { question_id: String, value: String },

    /// No submission with this id.
    #[error("submission not found: {0}")]
    NotFound(String),

    /// The submission store rejected the insert.
    #[error("submission store error: {0}")]
    Store(#[from] StoreError),
}

impl SubmissionError {
    /// Whether the caller's input was at fault.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::UnknownQuestion(_) | Self::InvalidAnswer { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_offending_values() {
        let err = SubmissionError::InvalidAnswer {
            question_id: "Q-001".into(),
            value: "maybe".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid answer for Q-001: maybe. Must be yes, no, or n/a"
        );
        assert_eq!(
            SubmissionError::UnknownQuestion("INVALID".into()).to_string(),
            "invalid question_id: INVALID"
        );
    }

    #[test]
    fn only_input_errors_are_validation() {
        assert!(SubmissionError::UnknownQuestion("x".into()).is_validation());
        assert!(!SubmissionError::NotFound("x".into()).is_validation());
        assert!(!SubmissionError::Store(StoreError::Duplicate("x".into())).is_validation());
    }
}
