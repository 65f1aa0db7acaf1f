//! Error types for fetching column suggestions.

use colmap_map::MapError;
use colmap_model::ModelError;
use thiserror::Error;

/// Errors a [`SuggestionSource`](crate::SuggestionSource) can report.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SuggestError {
    /// Request could not be sent or the connection failed.
    #[error("network error: {0}")]
    Network(String),

    /// Server answered with a non-success status.
    #[error("suggestion endpoint returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// Response body did not carry a usable `mapping` object.
    #[error("malformed suggestion response: {0}")]
    MalformedResponse(String),

    /// Request was rejected as malformed by the engine.
    #[error("invalid suggestion request: {0}")]
    InvalidInput(String),
}

impl SuggestError {
    /// Whether this failure means "no suggestions available".
    ///
    /// Unavailable failures degrade to an untouched form. Anything else is a
    /// contract mismatch between the caller and the engine.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Status { .. } | Self::MalformedResponse(_)
        )
    }

    /// Short message suitable for a status line.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Network(_) => "Could not reach the suggestion service.",
            Self::Status { .. } | Self::MalformedResponse(_) => {
                "The suggestion service is unavailable. Map columns manually."
            }
            Self::InvalidInput(_) => "The column list could not be sent for suggestions.",
        }
    }
}

impl From<reqwest::Error> for SuggestError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<ModelError> for SuggestError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::InvalidInput(msg) => Self::InvalidInput(msg),
            other => Self::MalformedResponse(other.to_string()),
        }
    }
}

impl From<MapError> for SuggestError {
    fn from(err: MapError) -> Self {
        match err {
            MapError::InvalidInput(msg) => Self::InvalidInput(msg),
            other => Self::InvalidInput(other.to_string()),
        }
    }
}

/// Result type alias for suggestion fetches.
pub type Result<T> = std::result::Result<T, SuggestError>;
