//! LLM transport error types

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while talking to the language backend
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("timeout after {0:?}")]
    Timeout(Duration),

    #[error("malformed reply: {0}")]
    Malformed(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LlmError {
    /// Whether retrying the same request could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::RateLimited { .. } => true,
            LlmError::Api { status, .. } => *status >= 500,
            LlmError::Network(_) => true,
            LlmError::Timeout(_) => true,
            LlmError::Malformed(_) => false,
            LlmError::Json(_) => false,
        }
    }

    /// Server-suggested backoff, when the backend provided one
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            LlmError::RateLimited { retry_after } => Some(*retry_after),
            _ => None,
        }
    }
}
