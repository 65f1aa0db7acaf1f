//! Request handling for the suggestion endpoint, independent of transport.

use colmap_model::{ImportProfile, SuggestRequest, SuggestResponse};
use tracing::info;

use crate::engine::{SuggestionEngine, SuggestionReport};
use crate::error::Result;

/// Suggestion engine bound to an import profile.
///
/// Holds no per-request state; share it freely between concurrent requests.
#[derive(Debug, Clone)]
pub struct SuggestionService {
    profile: ImportProfile,
    engine: SuggestionEngine,
}

impl SuggestionService {
    pub fn new(profile: ImportProfile) -> Result<Self> {
        profile.validate()?;
        let engine = SuggestionEngine::for_profile(&profile)?;
        Ok(Self { profile, engine })
    }

    /// Bind a profile to an explicitly configured engine.
    pub fn with_engine(profile: ImportProfile, engine: SuggestionEngine) -> Result<Self> {
        profile.validate()?;
        Ok(Self { profile, engine })
    }

    pub fn profile(&self) -> &ImportProfile {
        &self.profile
    }

    pub fn engine(&self) -> &SuggestionEngine {
        &self.engine
    }

    /// Full report for a column list.
    pub fn report(&self, columns: &[String]) -> Result<SuggestionReport> {
        let report = self.engine.suggest(&self.profile.fields, columns)?;
        info!(
            profile = %self.profile.name,
            columns = columns.len(),
            mapped = report.accepted.len(),
            unmapped_fields = report.unmapped_fields.len(),
            "suggested column mapping"
        );
        Ok(report)
    }

    pub fn handle(&self, request: &SuggestRequest) -> Result<SuggestResponse> {
        let report = self.report(&request.columns)?;
        Ok(SuggestResponse::new(report.into_mapping()))
    }

    /// Decode a JSON request body, suggest, and encode the response body.
    pub fn handle_json(&self, body: &[u8]) -> Result<String> {
        let request = SuggestRequest::from_json(body)?;
        let response = self.handle(&request)?;
        Ok(response.to_json()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MapError;

    #[test]
    fn handles_json_round_trip() {
        let service = SuggestionService::new(ImportProfile::from_ids("c", ["email", "phone"]))
            .unwrap();
        let body = service
            .handle_json(br#"{"columns": ["Email Address", "Phone Number", "Notes"]}"#)
            .unwrap();
        let response = SuggestResponse::from_json(body.as_bytes()).unwrap();
        assert_eq!(response.mapping.get("email"), Some("Email Address"));
        assert_eq!(response.mapping.get("phone"), Some("Phone Number"));
        assert_eq!(response.mapping.len(), 2);
    }

    #[test]
    fn malformed_request_fails_loudly() {
        let service = SuggestionService::new(ImportProfile::projects()).unwrap();
        let err = service.handle_json(br#"{"columns": [1, 2]}"#);
        assert!(matches!(err, Err(MapError::InvalidInput(_))));
    }

    #[test]
    fn empty_profile_rejected() {
        let err = SuggestionService::new(ImportProfile::new("none", Vec::new()));
        assert!(matches!(err, Err(MapError::InvalidInput(_))));
    }
}
