//! Extraction oracle port.
//!
//! Abstracts the LLM call that turns free text into a partial expense. The
//! oracle is external, latency-bearing and non-deterministic; callers treat
//! every failure as a recoverable event and fall back to an empty draft.

use async_trait::async_trait;

use crate::domain::expense::ExpenseDraft;

/// Port for extracting expense fields from free text.
///
/// Implementations call an external language model and translate its output
/// into an [`ExpenseDraft`], leaving unmentioned fields `None`.
#[async_trait]
pub trait ExpenseExtractor: Send + Sync {
    /// Extracts a best-effort partial expense from the given text.
    async fn extract(&self, text: &str) -> Result<ExpenseDraft, ExtractionError>;
}

/// Extraction oracle errors.
///
/// Every variant is recoverable from the session's point of view; the
/// classification exists for logging and for hosts that want to retry.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ExtractionError {
    /// Rate limited by the provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },

    /// The provider responded but the payload was not the expected JSON.
    #[error("malformed response: {0}")]
    Parse(String),

    /// Provider is unavailable (5xx).
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// The request itself was rejected (4xx other than auth/rate limit).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ExtractionError {
    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Returns true if retrying the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ExtractionError::RateLimited { .. }
                | ExtractionError::Network(_)
                | ExtractionError::Timeout { .. }
                | ExtractionError::Unavailable { .. }
        )
    }
}
