//! Completion errors

use thiserror::Error;

/// Errors that can occur during a completion call
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Failed to connect to the completion server
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the completion server failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response body was missing or malformed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Timeout during the completion call
    #[error("Completion timeout after {0}ms")]
    Timeout(u64),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Server returned a non-success status
    #[error("Server error: {0}")]
    ServerError(String),
}

impl CompletionError {
    /// Whether this failure is transient (network-level) rather than a
    /// service-side rejection
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::RequestFailed(_) | Self::Timeout(_)
        )
    }
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(30000)
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}
