//! Field-to-column mapping types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Proposed or confirmed assignment of destination fields to source columns.
///
/// Each field appears at most once. Engine output additionally never reuses a
/// column; mappings decoded from elsewhere are not checked for that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mapping(BTreeMap<String, String>);

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the column for a field, returning the previous column if any.
    pub fn insert(&mut self, field: impl Into<String>, column: impl Into<String>) -> Option<String> {
        self.0.insert(field.into(), column.into())
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Field currently backed by `column`, if any.
    pub fn field_for_column(&self, column: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(_, c)| c.as_str() == column)
            .map(|(f, _)| f.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(f, c)| (f.as_str(), c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl FromIterator<(String, String)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Mapping {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Which similarity measure produced a candidate's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchBasis {
    /// Normalized keys are identical.
    Exact,
    /// One normalized key contains the other.
    Containment,
    /// Jaccard overlap of the token sets.
    TokenOverlap,
    /// Normalized Levenshtein similarity.
    EditDistance,
}

impl MatchBasis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Containment => "containment",
            Self::TokenOverlap => "token overlap",
            Self::EditDistance => "edit distance",
        }
    }
}

impl fmt::Display for MatchBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score for a single `(field, column)` pair. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateScore {
    pub field: String,
    /// Column label exactly as it appeared in the source document.
    pub column: String,
    /// Position of the column in the source document.
    pub column_index: usize,
    /// Similarity in [0, 1].
    pub score: f64,
    pub basis: MatchBasis,
}
