//! Tabular catalog records and their column layout.

use std::collections::BTreeMap;

use cqs_core::{AnswerType, Question, TrackedStandards};

/// Column holding the question id (the merge key).
pub const COL_QUESTION_ID: &str = "Question_ID";
/// Column holding the question text.
pub const COL_QUESTION: &str = "Question";
/// Column holding the IAM domain classification.
pub const COL_DOMAIN: &str = "IAM_Domain";
/// Column holding the sub-domain classification.
pub const COL_SUB_DOMAIN: &str = "Sub_Domain";
/// Column holding the expected answer shape.
pub const COL_ANSWER_TYPE: &str = "Answer_Type";
/// Column holding catalog author notes.
pub const COL_NOTES: &str = "Notes";

/// One source row: field name → string value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogRecord {
    fields: BTreeMap<String, String>,
}

impl CatalogRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field (builder style).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Field value, or `""` when absent.
    pub fn get(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }

    /// The trimmed question id, or `None` when blank or missing.
    pub fn question_id(&self) -> Option<&str> {
        Some(self.get(COL_QUESTION_ID).trim()).filter(|id| !id.is_empty())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The raw record as a JSON object, kept on the question as metadata.
    pub fn to_meta(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.fields
                .iter()
                .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                .collect(),
        )
    }

    /// Build a question from this record.
    ///
    /// Returns `None` when the record has no question id. Only tracked
    /// standards with a non-blank control reference become mappings.
    pub fn to_question(&self, standards: &TrackedStandards) -> Option<Question> {
        let question_id = self.question_id()?;

        let mut question = Question::new(question_id, self.get(COL_QUESTION));
        question.domain = self.get(COL_DOMAIN).to_string();
        question.sub_domain = self.get(COL_SUB_DOMAIN).to_string();
        question.answer_type = AnswerType::parse_or_default(self.get(COL_ANSWER_TYPE));
        question.notes = self.get(COL_NOTES).to_string();
        for key in standards {
            let reference = self.get(key.as_str()).trim();
            if !reference.is_empty() {
                question.standards.insert(key.clone(), reference.to_string());
            }
        }
        question.meta = self.to_meta();
        Some(question)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CatalogRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cqs_core::StandardKey;

    fn row() -> CatalogRecord {
        CatalogRecord::new()
            .with(COL_QUESTION_ID, "Q-001")
            .with(COL_QUESTION, "Do you have MFA?")
            .with(COL_DOMAIN, "Access Control")
            .with(COL_SUB_DOMAIN, "MFA")
            .with("ISO_27001_2022", "A.9.4.1")
            .with("NIST_800_53_Rev5", "")
            .with(COL_ANSWER_TYPE, "")
            .with(COL_NOTES, "")
    }

    #[test]
    fn maps_all_columns() {
        let q = row().to_question(&TrackedStandards::default()).unwrap();
        assert_eq!(q.question_id, "Q-001");
        assert_eq!(q.question_text, "Do you have MFA?");
        assert_eq!(q.domain, "Access Control");
        assert_eq!(q.sub_domain, "MFA");
        assert_eq!(q.answer_type, AnswerType::YesNoNa);
        assert_eq!(q.standards.len(), 1);
        assert_eq!(
            q.control_reference(&StandardKey::new("ISO_27001_2022").unwrap()),
            Some("A.9.4.1")
        );
        assert_eq!(q.meta["Question_ID"], "Q-001");
    }

    #[test]
    fn untracked_columns_are_not_mappings() {
        let tracked = TrackedStandards::parse("GDPR").unwrap();
        let q = row().to_question(&tracked).unwrap();
        assert!(q.standards.is_empty());
        assert_eq!(q.meta["ISO_27001_2022"], "A.9.4.1");
    }

    #[test]
    fn blank_id_yields_none() {
        let tracked = TrackedStandards::default();
        assert!(CatalogRecord::new().to_question(&tracked).is_none());
        assert!(row()
            .with(COL_QUESTION_ID, "  ")
            .to_question(&tracked)
            .is_none());
    }

    #[test]
    fn id_is_trimmed() {
        let r = row().with(COL_QUESTION_ID, " Q-010 ");
        assert_eq!(r.question_id(), Some("Q-010"));
    }

    #[test]
    fn collects_from_pairs() {
        let r: CatalogRecord = vec![("Question_ID", "Q-1"), ("Question", "x")]
            .into_iter()
            .collect();
        assert_eq!(r.len(), 2);
        assert_eq!(r.get("Question"), "x");
        assert_eq!(r.get("Missing"), "");
    }
}
