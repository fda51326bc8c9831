//! Per-standard evaluation.

use std::collections::HashMap;

use cqs_core::{
    Answer, AnswerValue, ComplianceStatus, ComplianceSummary, Question, StandardKey,
    StandardSummary, StatusCounts,
};

/// Answers keyed by question id. A later answer for the same question
/// replaces an earlier one.
pub type AnswerIndex<'a> = HashMap<&'a str, &'a Answer>;

/// Index answers by question id.
pub fn index_answers(answers: &[Answer]) -> AnswerIndex<'_> {
    answers
        .iter()
        .map(|a| (a.question_id.as_str(), a))
        .collect()
}

/// Evaluate every standard in `standards` against the catalog snapshot.
pub fn evaluate(catalog: &[Question], answers: &[Answer], standards: &[StandardKey]) -> ComplianceSummary {
    let index = index_answers(answers);
    standards
        .iter()
        .map(|standard| (standard.clone(), evaluate_standard(catalog, &index, standard)))
        .collect()
}

/// Evaluate one standard.
///
/// Relevant questions are visited in catalog order, so `na_notes` follows
/// the catalog rather than the order answers were submitted in. An answer
/// whose token does not normalize counts as unanswered.
pub fn evaluate_standard(
    catalog: &[Question],
    answers: &AnswerIndex<'_>,
    standard: &StandardKey,
) -> StandardSummary {
    let mut counts = StatusCounts::default();
    let mut na_notes = Vec::new();

    for question in catalog.iter().filter(|q| q.is_relevant_to(standard)) {
        counts.total += 1;
        let answer = answers.get(question.question_id.as_str());
        match answer.and_then(|a| a.parsed()) {
            Some(AnswerValue::Yes) => counts.yes += 1,
            Some(AnswerValue::No) => counts.no += 1,
            Some(AnswerValue::NotApplicable) => {
                counts.na += 1;
                if let Some(notes) = answer.and_then(|a| a.notes()) {
                    na_notes.push(format!("{}: {}", question.question_id, notes));
                }
            }
            None => counts.unanswered += 1,
        }
    }

    if counts.total == 0 {
        return StandardSummary::not_applicable();
    }

    StandardSummary {
        status: classify(&counts),
        counts,
        na_notes,
    }
}

/// Apply the status decision list to a set of tallies.
pub fn classify(counts: &StatusCounts) -> ComplianceStatus {
    if counts.total == 0 {
        ComplianceStatus::NotApplicable
    } else if counts.no > 0 {
        ComplianceStatus::NonCompliant
    } else if counts.na > 0 && counts.yes == counts.total - counts.na {
        ComplianceStatus::Partial
    } else if counts.yes == counts.total {
        ComplianceStatus::Compliant
    } else {
        ComplianceStatus::Unknown
    }
}
