use thiserror::Error;

/// Errors raised while building or decoding model values.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ModelError {
    /// Request or profile shape violates the contract.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Suggestion response does not carry a usable `mapping` object.
    #[error("malformed suggestion response: {0}")]
    MalformedResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;
