//! # Catalog Questions
//!
//! A [`Question`] is created or overwritten in full by the catalog importer
//! and is read-only everywhere else. Its `standards` map is what makes a
//! question relevant to a tracked standard.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::standard::StandardKey;

/// Answer shape assumed when a catalog row leaves `Answer_Type` blank.
pub const DEFAULT_ANSWER_TYPE: &str = "yes_no_na";

/// Expected answer shape for a question.
///
/// Only the tri-state yes/no/not-applicable shape has engine semantics; any
/// other tag from the catalog is carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AnswerType {
    /// `yes_no_na`: answered with yes, no, or n/a.
    #[default]
    YesNoNa,
    /// Any other catalog-defined tag.
    Other(String),
}

impl AnswerType {
    /// Parse a catalog value, falling back to [`AnswerType::YesNoNa`] when blank.
    pub fn parse_or_default(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == DEFAULT_ANSWER_TYPE {
            Self::YesNoNa
        } else {
            Self::Other(trimmed.to_string())
        }
    }

    /// Return the catalog tag.
    pub fn as_str(&self) -> &str {
        match self {
            Self::YesNoNa => DEFAULT_ANSWER_TYPE,
            Self::Other(tag) => tag,
        }
    }
}

impl fmt::Display for AnswerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for AnswerType {
    fn from(raw: String) -> Self {
        Self::parse_or_default(&raw)
    }
}

impl From<AnswerType> for String {
    fn from(value: AnswerType) -> Self {
        value.as_str().to_string()
    }
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Globally unique, stable merge key.
    pub question_id: String,
    pub question_text: String,
    /// Free-text classification (IAM domain in the shipped catalog).
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub sub_domain: String,
    #[serde(default)]
    pub answer_type: AnswerType,
    /// Catalog author notes; unrelated to answer notes.
    #[serde(default)]
    pub notes: String,
    /// Standard key → control reference. Presence of a non-empty reference
    /// makes the question relevant to that standard.
    #[serde(default)]
    pub standards: BTreeMap<StandardKey, String>,
    /// Raw source record, passed through untouched.
    #[serde(default)]
    pub meta: serde_json::Value,
}

impl Question {
    /// Create a question with no standard mappings and default attributes.
    pub fn new(question_id: impl Into<String>, question_text: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            question_text: question_text.into(),
            domain: String::new(),
            sub_domain: String::new(),
            answer_type: AnswerType::default(),
            notes: String::new(),
            standards: BTreeMap::new(),
            meta: serde_json::Value::Null,
        }
    }

    /// Add a standard mapping (builder style).
    pub fn with_standard(mut self, key: StandardKey, control_reference: impl Into<String>) -> Self {
        self.standards.insert(key, control_reference.into());
        self
    }

    /// The control reference for `standard`, if the question is relevant to it.
    pub fn control_reference(&self, standard: &StandardKey) -> Option<&str> {
        self.standards
            .get(standard)
            .map(String::as_str)
            .filter(|r| !r.trim().is_empty())
    }

    /// Whether the question carries a non-empty control reference for `standard`.
    pub fn is_relevant_to(&self, standard: &StandardKey) -> bool {
        self.control_reference(standard).is_some()
    }

    /// Overwrite every mutable attribute with the incoming question's values.
    ///
    /// The merge key is never changed. Destructuring keeps this exhaustive:
    /// a new field on `Question` fails to compile here until it is merged.
    pub fn overwrite_from(&mut self, incoming: Question) {
        let Question {
            question_id,
            question_text,
            domain,
            sub_domain,
            answer_type,
            notes,
            standards,
            meta,
        } = incoming;
        debug_assert_eq!(question_id, self.question_id, "merge key mismatch");

        self.question_text = question_text;
        self.domain = domain;
        self.sub_domain = sub_domain;
        self.answer_type = answer_type;
        self.notes = notes;
        self.standards = standards;
        self.meta = meta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> StandardKey {
        StandardKey::new(s).unwrap()
    }

    #[test]
    fn answer_type_defaults_when_blank() {
        assert_eq!(AnswerType::parse_or_default(""), AnswerType::YesNoNa);
        assert_eq!(AnswerType::parse_or_default("  "), AnswerType::YesNoNa);
        assert_eq!(AnswerType::parse_or_default("yes_no_na"), AnswerType::YesNoNa);
        assert_eq!(
            AnswerType::parse_or_default("free_text"),
            AnswerType::Other("free_text".to_string())
        );
    }

    #[test]
    fn answer_type_serializes_as_tag() {
        let json = serde_json::to_string(&AnswerType::YesNoNa).unwrap();
        assert_eq!(json, "\"yes_no_na\"");
        let other: AnswerType = serde_json::from_str("\"scale_1_5\"").unwrap();
        assert_eq!(other.as_str(), "scale_1_5");
    }

    #[test]
    fn relevance_requires_non_empty_reference() {
        let q = Question::new("Q-001", "Do you have MFA?")
            .with_standard(key("GDPR"), "Art. 32")
            .with_standard(key("HIPAA"), "  ");
        assert!(q.is_relevant_to(&key("GDPR")));
        assert!(!q.is_relevant_to(&key("HIPAA")));
        assert!(!q.is_relevant_to(&key("SOC_2_TSC")));
        assert_eq!(q.control_reference(&key("GDPR")), Some("Art. 32"));
    }

    #[test]
    fn overwrite_replaces_every_mutable_field() {
        let mut existing = Question::new("Q-001", "old text").with_standard(key("GDPR"), "Art. 5");
        existing.domain = "Old".to_string();
        existing.notes = "old note".to_string();

        let mut incoming = Question::new("Q-001", "new text").with_standard(key("HIPAA"), "164.312");
        incoming.domain = "Access Control".to_string();
        incoming.sub_domain = "MFA".to_string();
        incoming.answer_type = AnswerType::Other("free_text".to_string());
        incoming.meta = serde_json::json!({"Question_ID": "Q-001"});

        existing.overwrite_from(incoming.clone());
        assert_eq!(existing, incoming);
        assert!(!existing.is_relevant_to(&key("GDPR")));
        assert!(existing.notes.is_empty());
    }

    #[test]
    fn question_serde_fills_defaults() {
        let q: Question =
            serde_json::from_str(r#"{"question_id":"Q-9","question_text":"t"}"#).unwrap();
        assert_eq!(q.answer_type, AnswerType::YesNoNa);
        assert!(q.standards.is_empty());
        assert!(q.meta.is_null());
    }
}
