//! Answer validation against a catalog snapshot.

use std::collections::HashSet;

use cqs_core::{Answer, Question};

use crate::error::SubmissionError;

/// Check every answer before anything is evaluated or stored.
///
/// Answers are checked in order and the first offender is reported. The
/// question id must be in `catalog` and the token must normalize to
/// yes, no or n/a.
pub fn validate_answers(catalog: &[Question], answers: &[Answer]) -> Result<(), SubmissionError> {
    let known: HashSet<&str> = catalog.iter().map(|q| q.question_id.as_str()).collect();

    for answer in answers {
        if !known.contains(answer.question_id.as_str()) {
            return Err(SubmissionError::UnknownQuestion(answer.question_id.clone()));
        }
        if answer.parsed().is_none() {
            return Err(SubmissionError::InvalidAnswer {
                question_id: answer.question_id.clone(),
                value: answer.value.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Question> {
        vec![Question::new("Q-001", "a"), Question::new("Q-002", "b")]
    }

    #[test]
    fn accepts_known_ids_and_tokens() {
        let answers = [
            Answer::new("Q-001", "Yes"),
            Answer::new("Q-002", " n/a "),
        ];
        assert!(validate_answers(&catalog(), &answers).is_ok());
    }

    #[test]
    fn empty_answer_set_is_valid() {
        assert!(validate_answers(&catalog(), &[]).is_ok());
    }

    #[test]
    fn rejects_unknown_question() {
        let answers = [Answer::new("Q-001", "yes"), Answer::new("INVALID", "yes")];
        assert_eq!(
            validate_answers(&catalog(), &answers),
            Err(SubmissionError::UnknownQuestion("INVALID".into()))
        );
    }

    #[test]
    fn rejects_unrecognized_token() {
        let answers = [Answer::new("Q-002", "maybe")];
        assert_eq!(
            validate_answers(&catalog(), &answers),
            Err(SubmissionError::InvalidAnswer {
                question_id: "Q-002".into(),
                value: "maybe".into(),
            })
        );
    }

    #[test]
    fn reports_first_offender() {
        let answers = [Answer::new("Q-001", "bogus"), Answer::new("NOPE", "yes")];
        let err = validate_answers(&catalog(), &answers).unwrap_err();
        assert!(matches!(err, SubmissionError::InvalidAnswer { ref question_id, .. } if question_id == "Q-001"));
    }
}
