//! Pipeline error taxonomy.
//!
//! Every failure in the pipeline collapses into one of these kinds so callers
//! can tell a flaky upstream apart from bad upstream data or bad input.
//! Messages are safe to return to HTTP clients: they never contain upstream
//! URLs or credentials.

use thiserror::Error;

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Network failure, timeout, rate limit or 5xx; retried before surfacing
    #[error("{service} unavailable: {message}")]
    UpstreamUnavailable {
        service: &'static str,
        message: String,
    },

    /// Upstream answered but refused the request (4xx, bad credentials)
    #[error("{service} rejected the request: {message}")]
    UpstreamRejected {
        service: &'static str,
        status: Option<u16>,
        message: String,
    },

    /// Upstream answered with data of the wrong shape
    #[error("malformed response from {service}: {message}")]
    MalformedUpstream {
        service: &'static str,
        message: String,
    },

    /// No usable JSON could be recovered from model output
    #[error("data extraction failed: {0}")]
    DataExtraction(String),

    #[error("invalid input: {0}")]
    Validation(String),

    #[error("not enough data: {0}")]
    InsufficientData(String),

    #[error("persistence failed: {0}")]
    Persistence(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl PipelineError {
    pub fn unavailable(service: &'static str, message: impl Into<String>) -> Self {
        PipelineError::UpstreamUnavailable {
            service,
            message: message.into(),
        }
    }

    pub fn rejected(service: &'static str, status: Option<u16>, message: impl Into<String>) -> Self {
        PipelineError::UpstreamRejected {
            service,
            status,
            message: message.into(),
        }
    }

    pub fn malformed(service: &'static str, message: impl Into<String>) -> Self {
        PipelineError::MalformedUpstream {
            service,
            message: message.into(),
        }
    }

    /// Only unavailable upstreams are worth retrying.
    pub fn is_transient(&self) -> bool {
        matches!(self, PipelineError::UpstreamUnavailable { .. })
    }

    /// Short machine-readable kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::UpstreamUnavailable { .. } => "upstream_unavailable",
            PipelineError::UpstreamRejected { .. } => "upstream_rejected",
            PipelineError::MalformedUpstream { .. } => "malformed_upstream",
            PipelineError::DataExtraction(_) => "data_extraction",
            PipelineError::Validation(_) => "validation",
            PipelineError::InsufficientData(_) => "insufficient_data",
            PipelineError::Persistence(_) => "persistence",
            PipelineError::Internal(_) => "internal",
        }
    }
}

impl From<sqlx::Error> for PipelineError {
    fn from(e: sqlx::Error) -> Self {
        PipelineError::Persistence(e.to_string())
    }
}

impl From<gemini_client::GeminiError> for PipelineError {
    fn from(e: gemini_client::GeminiError) -> Self {
        use gemini_client::GeminiError;

        const SERVICE: &str = "language model";
        let transient = e.is_transient();
        match e {
            GeminiError::Network(message) => PipelineError::unavailable(SERVICE, message),
            GeminiError::Api { status, message } if transient => {
                PipelineError::unavailable(SERVICE, format!("HTTP {}: {}", status, message))
            }
            GeminiError::Api { status, message } => {
                PipelineError::rejected(SERVICE, Some(status), message)
            }
            GeminiError::Config(message) => PipelineError::rejected(SERVICE, None, message),
            GeminiError::Parse(message) | GeminiError::EmptyResponse(message) => {
                PipelineError::malformed(SERVICE, message)
            }
        }
    }
}

impl From<reddit_client::RedditError> for PipelineError {
    fn from(e: reddit_client::RedditError) -> Self {
        use reddit_client::RedditError;

        const SERVICE: &str = "social search";
        let transient = e.is_transient();
        match e {
            RedditError::Network(message) => PipelineError::unavailable(SERVICE, message),
            RedditError::Api { status, message } if transient => {
                PipelineError::unavailable(SERVICE, format!("HTTP {}: {}", status, message))
            }
            RedditError::Api { status, message } => {
                PipelineError::rejected(SERVICE, Some(status), message)
            }
            RedditError::Config(message) => PipelineError::rejected(SERVICE, None, message),
            RedditError::Parse(message) => PipelineError::malformed(SERVICE, message),
        }
    }
}

/// Classify a reqwest failure for a plain HTTP upstream.
pub fn from_reqwest(service: &'static str, e: reqwest::Error) -> PipelineError {
    let decode = e.is_decode();
    let message = e.without_url().to_string();
    if decode {
        PipelineError::malformed(service, message)
    } else {
        PipelineError::unavailable(service, message)
    }
}

/// Classify a non-2xx status for a plain HTTP upstream.
pub fn from_status(service: &'static str, status: reqwest::StatusCode) -> PipelineError {
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
        PipelineError::unavailable(service, format!("HTTP {}", status))
    } else {
        PipelineError::rejected(service, Some(status.as_u16()), format!("HTTP {}", status))
    }
}
