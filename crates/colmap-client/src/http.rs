//! HTTP client for a remote suggestion endpoint.

use std::time::Duration;

use colmap_model::{Mapping, SuggestRequest, SuggestResponse};
use tracing::debug;

use crate::error::{Result, SuggestError};
use crate::source::SuggestionSource;

/// User agent string for suggestion requests.
const USER_AGENT_VALUE: &str = concat!("colmap/", env!("CARGO_PKG_VERSION"));

/// Fetches suggestions by POSTing the column list as JSON.
#[derive(Debug, Clone)]
pub struct HttpSuggestionSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSuggestionSource {
    /// Creates a source for `endpoint` using the transport's default timeout.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::build(endpoint.into(), None)
    }

    /// Creates a source whose requests give up after `timeout`.
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        Self::build(endpoint.into(), Some(timeout))
    }

    fn build(endpoint: String, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT_VALUE);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| SuggestError::Network(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Checks the status and decodes the body.
    async fn handle_response(response: reqwest::Response) -> Result<Mapping> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SuggestError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        let decoded = SuggestResponse::from_json(&body)?;
        Ok(decoded.mapping)
    }
}

impl SuggestionSource for HttpSuggestionSource {
    async fn fetch(&self, columns: &[String]) -> Result<Mapping> {
        debug!(
            endpoint = %self.endpoint,
            columns = columns.len(),
            "requesting column suggestions"
        );
        let request = SuggestRequest::new(columns.iter().cloned());
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;
        let mapping = Self::handle_response(response).await?;
        debug!(suggested = mapping.len(), "received column suggestions");
        Ok(mapping)
    }
}
