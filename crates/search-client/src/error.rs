//! Error types for the search client

use thiserror::Error;

/// Errors that can occur while talking to a search backend
#[derive(Debug, Error)]
pub enum SearchClientError {
    /// The request never produced a response
    #[error("Request failed ({kind}): {message}")]
    Transport { kind: &'static str, message: String },

    /// The service answered with a non-success status
    #[error("Search service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be decoded
    #[error("Failed to decode search response: {0}")]
    Decode(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<SearchClientError> for neutrino_core::Error {
    fn from(err: SearchClientError) -> Self {
        match err {
            SearchClientError::Config(msg) => neutrino_core::Error::config(msg),
            other => neutrino_core::Error::backend_unavailable(other.to_string()),
        }
    }
}
