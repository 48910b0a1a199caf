//! API error types for the issue client.

use thiserror::Error;

/// Errors that can occur when talking to the issue endpoint.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Rate limited by the server.
    #[error("Rate limited: please wait before retrying")]
    RateLimited,

    /// Server-side error.
    #[error("Server error: {0}")]
    ServerError(String),

    /// The server rejected the request.
    #[error("Request rejected: {0}")]
    BadRequest(String),

    /// Network or HTTP error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Invalid endpoint URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The response body could not be understood.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// The server answered but flagged the request as failed.
    #[error("Request failed: server reported success = false")]
    Unsuccessful,
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Create an error from an HTTP status code.
    pub fn from_status(status: reqwest::StatusCode, context: &str) -> Self {
        match status.as_u16() {
            404 => ApiError::NotFound(context.to_string()),
            429 => ApiError::RateLimited,
            400..=499 => ApiError::BadRequest(format!("HTTP {}: {}", status, context)),
            500..=599 => ApiError::ServerError(format!("HTTP {}: {}", status, context)),
            _ => ApiError::ServerError(format!("Unexpected HTTP {}: {}", status, context)),
        }
    }
}
