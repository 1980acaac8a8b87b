use thiserror::Error;

pub type Result<T> = std::result::Result<T, RedditError>;

#[derive(Debug, Error)]
pub enum RedditError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Network(String),

    #[error("Reddit API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse Reddit response: {0}")]
    Parse(String),
}

impl RedditError {
    /// Network failures, rate limiting and 5xx responses may succeed on retry.
    pub fn is_transient(&self) -> bool {
        match self {
            RedditError::Network(_) => true,
            RedditError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for RedditError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            RedditError::Parse(e.without_url().to_string())
        } else {
            RedditError::Network(e.without_url().to_string())
        }
    }
}
