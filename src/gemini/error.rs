//! Error types for Gemini API integration

use thiserror::Error;

/// Errors that can occur when interacting with the Gemini API
#[derive(Debug, Error)]
pub enum GeminiError {
    /// API key is not configured
    #[error("API key not configured. Set {0} in the environment")]
    ApiKeyNotFound(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error ({status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from API
        message: String,
    },

    /// Rate limited by the API
    #[error("Rate limited. Retry after {retry_after_seconds} seconds")]
    RateLimited {
        /// Seconds to wait before retrying
        retry_after_seconds: u64,
    },

    /// The response carried no text (blocked or empty candidate)
    #[error("Model returned no text")]
    EmptyResponse,

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
