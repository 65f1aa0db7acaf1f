//! JSON request/response contract of the suggestion endpoint.
//!
//! ```text
//! POST /import/suggest-mapping
//! { "columns": ["Email Address", "Phone Number"] }
//!
//! 200 OK
//! { "mapping": { "email": "Email Address", "phone": "Phone Number" } }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::mapping::Mapping;

/// Path the suggestion endpoint is conventionally mounted at.
pub const SUGGEST_PATH: &str = "/import/suggest-mapping";

/// Body of a suggestion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestRequest {
    /// Source column labels in document order.
    pub columns: Vec<String>,
}

impl SuggestRequest {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Decode a request body.
    ///
    /// A missing `columns` key or non-string entries are contract violations
    /// and surface as [`ModelError::InvalidInput`].
    pub fn from_json(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(|e| ModelError::InvalidInput(e.to_string()))
    }
}

/// Body of a successful suggestion response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SuggestResponse {
    pub mapping: Mapping,
}

#[derive(Deserialize)]
struct RawSuggestResponse {
    mapping: Option<BTreeMap<String, Option<String>>>,
}

impl SuggestResponse {
    pub fn new(mapping: Mapping) -> Self {
        Self { mapping }
    }

    /// Decode a response body.
    ///
    /// Unknown top-level keys are ignored. Entries whose column is `null` or
    /// empty mean "no suggestion" and are dropped. A missing or non-object
    /// `mapping` is a [`ModelError::MalformedResponse`].
    pub fn from_json(body: &[u8]) -> Result<Self> {
        let raw: RawSuggestResponse = serde_json::from_slice(body)
            .map_err(|e| ModelError::MalformedResponse(e.to_string()))?;
        let entries = raw
            .mapping
            .ok_or_else(|| ModelError::MalformedResponse("missing `mapping` key".to_string()))?;
        let mapping = entries
            .into_iter()
            .filter_map(|(field, column)| match column {
                Some(column) if !column.is_empty() => Some((field, column)),
                _ => None,
            })
            .collect();
        Ok(Self { mapping })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_rejects_non_string_columns() {
        let err = SuggestRequest::from_json(br#"{"columns": ["Name", 3]}"#);
        assert!(matches!(err, Err(ModelError::InvalidInput(_))));
    }

    #[test]
    fn request_rejects_missing_columns() {
        assert!(SuggestRequest::from_json(b"{}").is_err());
    }

    #[test]
    fn response_drops_null_and_empty_entries() {
        let body = br#"{"success": true, "mapping": {"email": "Email", "phone": null, "zip": ""}}"#;
        let response = SuggestResponse::from_json(body).unwrap();
        assert_eq!(response.mapping.len(), 1);
        assert_eq!(response.mapping.get("email"), Some("Email"));
    }

    #[test]
    fn response_without_mapping_is_malformed() {
        let err = SuggestResponse::from_json(br#"{"success": false}"#);
        assert!(matches!(err, Err(ModelError::MalformedResponse(_))));
    }

    #[test]
    fn response_with_array_mapping_is_malformed() {
        let err = SuggestResponse::from_json(br#"{"mapping": ["email"]}"#);
        assert!(matches!(err, Err(ModelError::MalformedResponse(_))));
    }
}
