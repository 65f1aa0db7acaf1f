//! Checks for a user-confirmed mapping before the import runs.

use std::collections::BTreeMap;

use colmap_model::{ImportProfile, Mapping};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// Problems found in a confirmed mapping.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum MappingIssue {
    /// Required field has no column.
    #[error("Required field not mapped: {field}")]
    MissingRequired { field: String },

    /// Column mapped to a field that is not part of the profile.
    #[error("Field not found: {field}")]
    UnknownField { field: String },

    /// Column not present in the source document.
    #[error("Column not found: {column}")]
    ColumnNotFound { column: String },

    /// Column already mapped to another field.
    #[error("Column '{column}' already mapped to '{field}'")]
    ColumnAlreadyUsed {
        /// The column that was already used.
        column: String,
        /// The field that claimed it first.
        field: String,
    },

    /// Field mapped while the field it recommends is not.
    #[error("Field '{field}' is mapped without '{recommends}'")]
    RecommendedMissing { field: String, recommends: String },
}

impl MappingIssue {
    pub fn severity(&self) -> IssueSeverity {
        match self {
            Self::RecommendedMissing { .. } => IssueSeverity::Warning,
            _ => IssueSeverity::Error,
        }
    }

    /// Field this issue is about, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingRequired { field }
            | Self::UnknownField { field }
            | Self::ColumnAlreadyUsed { field, .. }
            | Self::RecommendedMissing { field, .. } => Some(field),
            Self::ColumnNotFound { .. } => None,
        }
    }

    /// Column this issue is about, if any.
    pub fn column(&self) -> Option<&str> {
        match self {
            Self::ColumnNotFound { column } | Self::ColumnAlreadyUsed { column, .. } => {
                Some(column)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<MappingIssue>,
}

impl ValidationReport {
    pub fn errors(&self) -> impl Iterator<Item = &MappingIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity() == IssueSeverity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &MappingIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity() == IssueSeverity::Warning)
    }

    pub fn is_valid(&self) -> bool {
        self.errors().next().is_none()
    }
}

/// Validates a confirmed mapping against the profile and the source columns.
pub fn validate_mapping(
    profile: &ImportProfile,
    mapping: &Mapping,
    columns: &[String],
) -> ValidationReport {
    let mut issues = Vec::new();

    for field in profile.required_fields() {
        if !mapping.contains_field(&field.id) {
            issues.push(MappingIssue::MissingRequired {
                field: field.id.clone(),
            });
        }
    }

    let mut owners: BTreeMap<&str, &str> = BTreeMap::new();
    for (field, column) in mapping.iter() {
        if profile.field(field).is_none() {
            issues.push(MappingIssue::UnknownField {
                field: field.to_string(),
            });
        }
        if !columns.iter().any(|c| c == column) {
            issues.push(MappingIssue::ColumnNotFound {
                column: column.to_string(),
            });
        }
        match owners.get(column) {
            Some(owner) => issues.push(MappingIssue::ColumnAlreadyUsed {
                column: column.to_string(),
                field: (*owner).to_string(),
            }),
            None => {
                owners.insert(column, field);
            }
        }
    }

    for field in &profile.fields {
        if let Some(recommends) = &field.recommends
            && mapping.contains_field(&field.id)
            && !mapping.contains_field(recommends)
        {
            issues.push(MappingIssue::RecommendedMissing {
                field: field.id.clone(),
                recommends: recommends.clone(),
            });
        }
    }

    ValidationReport { issues }
}
