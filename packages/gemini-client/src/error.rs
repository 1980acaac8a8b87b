//! Error types for Gemini client.

use thiserror::Error;

/// Result type for Gemini client operations.
pub type Result<T> = std::result::Result<T, GeminiError>;

/// Gemini client errors.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Configuration error (missing API key, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// API error (non-2xx response, rate limit, invalid request)
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Parse error (invalid JSON, unexpected response format)
    #[error("Parse error: {0}")]
    Parse(String),

    /// The model returned no usable candidate (safety block, empty output)
    #[error("Empty response: {0}")]
    EmptyResponse(String),
}

impl GeminiError {
    /// Whether retrying the same request may succeed.
    ///
    /// Network failures, rate limiting and server-side errors are transient;
    /// everything else will fail the same way again.
    pub fn is_transient(&self) -> bool {
        match self {
            GeminiError::Network(_) => true,
            GeminiError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for GeminiError {
    fn from(e: reqwest::Error) -> Self {
        // The request URL never carries the key, but strip it anyway so error
        // strings stay safe to return to callers.
        GeminiError::Network(e.without_url().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(GeminiError::Network("reset".into()).is_transient());
        assert!(GeminiError::Api { status: 503, message: "busy".into() }.is_transient());
        assert!(GeminiError::Api { status: 429, message: "quota".into() }.is_transient());
        assert!(!GeminiError::Api { status: 400, message: "bad".into() }.is_transient());
        assert!(!GeminiError::Parse("eof".into()).is_transient());
        assert!(!GeminiError::EmptyResponse("blocked".into()).is_transient());
    }
}
