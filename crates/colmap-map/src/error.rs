//! Error types for suggestion operations.

use colmap_model::ModelError;
use thiserror::Error;

/// Errors from the suggestion engine.
///
/// Ordinary "no match" outcomes are not errors; they show up as fields absent
/// from the returned mapping.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MapError {
    /// Malformed request shape or configuration.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<ModelError> for MapError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::InvalidInput(message) => Self::InvalidInput(message),
            other => Self::InvalidInput(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, MapError>;
