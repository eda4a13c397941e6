//! Error types for Tern.

use thiserror::Error;

/// Primary error type for all Tern operations.
#[derive(Error, Debug)]
pub enum TernError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limited: retry after {retry_after_ms:?}ms")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl TernError {
    /// Create an API error from a status code and message.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Map a non-success HTTP status and its body to an error.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 | 403 => Self::Authentication(body.to_string()),
            429 => Self::RateLimited {
                retry_after_ms: extract_retry_after(body),
            },
            _ => Self::api(status, body),
        }
    }

    /// Whether this error is potentially retryable.
    ///
    /// Transport failures, rate limits, and server-side statuses qualify.
    /// A [`TernError::MalformedResponse`] never does: the payload shape is a
    /// contract violation that a retry cannot repair.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::RateLimited { .. } => true,
            Self::Api { status, .. } => (500..=599).contains(status),
            _ => false,
        }
    }
}

/// Best-effort extraction of a retry-after hint from a JSON error body.
fn extract_retry_after(body: &str) -> Option<u64> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("retry_after"))
                .and_then(|r| r.as_f64())
                .map(|s| (s * 1000.0) as u64)
        })
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, TernError>;
