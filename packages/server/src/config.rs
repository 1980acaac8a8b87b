use std::time::Duration;

use dotenvy::dotenv;
use thiserror::Error;

use crate::common::RetryPolicy;

pub const DEFAULT_ALERT_FEED_URL: &str =
    "https://ndem.nrsc.gov.in/documents/ndemV5/API/dbFetch.php?module=getWarnings";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub reddit_client_id: String,
    pub reddit_client_secret: String,
    pub reddit_user_agent: String,
    pub gcp_api_key: String,
    pub openweather_api_key: Option<String>,
    pub alert_feed_url: String,
    pub region_feed_url: Option<String>,
    pub train_classifier: bool,
    pub retry: RetryPolicy,
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        let _ = dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source. Every missing required variable is
    /// reported in a single error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let mut missing = Vec::new();
        let mut required = |name: &'static str| match var(name) {
            Some(v) => v,
            None => {
                missing.push(name);
                String::new()
            }
        };

        let database_url = required("DATABASE_URL");
        let gemini_api_key = required("GEMINI_API_KEY");
        let reddit_client_id = required("REDDIT_CLIENT_ID");
        let reddit_client_secret = required("REDDIT_CLIENT_SECRET");
        let reddit_user_agent = required("REDDIT_USER_AGENT");
        let gcp_api_key = required("GCP_API_KEY");

        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let port = parse_or("PORT", var("PORT"), 8000u16)?;
        let max_attempts = parse_or("RETRY_MAX_ATTEMPTS", var("RETRY_MAX_ATTEMPTS"), 3u32)?;
        let base_delay_ms = parse_or("RETRY_BASE_DELAY_MS", var("RETRY_BASE_DELAY_MS"), 500u64)?;
        let train_classifier = match var("TRAIN_CLASSIFIER") {
            None => false,
            Some(v) => parse_bool(&v).ok_or(ConfigError::Invalid {
                name: "TRAIN_CLASSIFIER",
                reason: format!("expected true/false, got {:?}", v),
            })?,
        };

        Ok(Self {
            database_url,
            port,
            gemini_api_key,
            gemini_model: var("GEMINI_MODEL")
                .unwrap_or_else(|| gemini_client::GEMINI_1_5_PRO.to_string()),
            reddit_client_id,
            reddit_client_secret,
            reddit_user_agent,
            gcp_api_key,
            openweather_api_key: var("OPENWEATHER_API_KEY"),
            alert_feed_url: var("ALERT_FEED_URL")
                .unwrap_or_else(|| DEFAULT_ALERT_FEED_URL.to_string()),
            region_feed_url: var("REGION_FEED_URL"),
            train_classifier,
            retry: RetryPolicy::new(max_attempts, Duration::from_millis(base_delay_ms)),
            allowed_origins: var("ALLOWED_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(v) => v.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
