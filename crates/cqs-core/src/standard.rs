//! # Tracked Standards
//!
//! The set of external control frameworks the engine evaluates is part of
//! system configuration, never inferred from catalog data. A question that
//! maps to a framework outside the tracked set is simply never reported on.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Standards tracked when no explicit configuration is supplied.
///
/// These are also the catalog column names the importer reads control
/// references from.
pub const DEFAULT_STANDARDS: &[&str] = &[
    "ISO_27001_2022",
    "NIST_800_53_Rev5",
    "SOC_2_TSC",
    "GDPR",
    "PCI_DSS_4_0",
    "HIPAA",
    "CIS_Controls",
];

/// Identifier of an external compliance framework (e.g. `ISO_27001_2022`).
///
/// Serializes as a plain string. Validated on construction: non-empty and
/// free of whitespace, since keys double as catalog column names and report
/// labels.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StandardKey(String);

impl StandardKey {
    /// Create a validated standard key. Surrounding whitespace is trimmed.
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidStandardKey(raw));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Return the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StandardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for StandardKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StandardKey> for String {
    fn from(key: StandardKey) -> Self {
        key.0
    }
}

impl PartialEq<&str> for StandardKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Ordered, de-duplicated list of the standards the engine evaluates.
///
/// Order is significant: it is the row order of the report's executive table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<StandardKey>")]
pub struct TrackedStandards(Vec<StandardKey>);

impl TrackedStandards {
    /// Build from explicit keys, dropping later duplicates.
    pub fn new(keys: impl IntoIterator<Item = StandardKey>) -> Result<Self, ValidationError> {
        let mut out: Vec<StandardKey> = Vec::new();
        for key in keys {
            if !out.contains(&key) {
                out.push(key);
            }
        }
        if out.is_empty() {
            return Err(ValidationError::EmptyStandards);
        }
        Ok(Self(out))
    }

    /// Parse a comma-separated list such as `"GDPR, HIPAA"`.
    ///
    /// Blank entries are ignored; a list with no remaining entries is rejected.
    pub fn parse(list: &str) -> Result<Self, ValidationError> {
        let keys = list
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(StandardKey::new)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(keys)
    }

    /// The keys in configured order.
    pub fn as_slice(&self) -> &[StandardKey] {
        &self.0
    }

    /// Iterate the keys in configured order.
    pub fn iter(&self) -> std::slice::Iter<'_, StandardKey> {
        self.0.iter()
    }

    /// Number of tracked standards.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false` for a constructed value; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<StandardKey>> for TrackedStandards {
    type Error = ValidationError;

    fn try_from(keys: Vec<StandardKey>) -> Result<Self, Self::Error> {
        Self::new(keys)
    }
}

impl Default for TrackedStandards {
    fn default() -> Self {
        Self(
            DEFAULT_STANDARDS
                .iter()
                .map(|s| StandardKey(s.to_string()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a TrackedStandards {
    type Item = &'a StandardKey;
    type IntoIter = std::slice::Iter<'a, StandardKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
