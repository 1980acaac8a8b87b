//! Pure Gemini REST API client
//!
//! A minimal client for the Gemini `generateContent` endpoint with no
//! domain-specific logic. Supports plain text generation and JSON mode.
//!
//! # Example
//!
//! ```rust,ignore
//! use gemini_client::GeminiClient;
//!
//! let client = GeminiClient::from_env()?;
//!
//! let text = client.generate_text("Summarise the flood warnings").await?;
//! let json = client.generate_json("Return the districts as a JSON array").await?;
//! ```

pub mod error;
pub mod schema;
pub mod types;

pub use error::{GeminiError, Result};
pub use schema::StructuredOutput;
pub use types::*;

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model.
pub const GEMINI_1_5_PRO: &str = "gemini-1.5-pro";

/// Pure Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    base_url: String,
    model: String,
    generation_config: GenerationConfig,
}

impl GeminiClient {
    /// Create a new client with the given API key and the default model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: GEMINI_1_5_PRO.to_string(),
            generation_config: GenerationConfig::default(),
        }
    }

    /// Create from environment variable `GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| GeminiError::Config("GEMINI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (proxies, test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Use a different model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the default sampling parameters.
    pub fn with_generation_config(mut self, config: GenerationConfig) -> Self {
        self.generation_config = config;
        self
    }

    /// Bound each request. Without this the reqwest default (no timeout) applies.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GeminiError::Config(e.to_string()))?;
        Ok(self)
    }

    /// Get the model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Generate free text for a single prompt.
    pub async fn generate_text(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest::user(prompt).config(self.generation_config.clone());
        Ok(self.generate_content(request).await?.text)
    }

    /// Generate a JSON response for a single prompt (JSON response mode).
    ///
    /// Returns the raw text; parse it in calling code.
    pub async fn generate_json(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest::user(prompt)
            .config(self.generation_config.clone())
            .json_mode();
        Ok(self.generate_content(request).await?.text)
    }

    /// Call `models/{model}:generateContent`.
    pub async fn generate_content(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                warn!(error = %e, "Gemini request failed");
                GeminiError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&error_text)
                .map(|e| e.error.message)
                .unwrap_or(error_text);
            warn!(status = %status, error = %message, "Gemini API error");
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let raw: types::GenerateResponseRaw = response
            .json()
            .await
            .map_err(|e| GeminiError::Parse(e.without_url().to_string()))?;

        let candidate = raw.candidates.into_iter().next().ok_or_else(|| {
            let feedback = raw
                .prompt_feedback
                .map(|f| f.to_string())
                .unwrap_or_else(|| "no candidates".to_string());
            GeminiError::EmptyResponse(feedback)
        })?;

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(GeminiError::EmptyResponse(format!(
                "candidate had no text (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            )));
        }

        debug!(
            model = %self.model,
            duration_ms = start.elapsed().as_millis(),
            total_tokens = raw.usage_metadata.as_ref().map(|u| u.total_token_count),
            "Gemini generateContent"
        );

        Ok(GenerateResponse {
            text,
            finish_reason: candidate.finish_reason,
            usage: raw.usage_metadata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let client = GeminiClient::new("key-test")
            .with_base_url("https://custom.api.com/")
            .with_model("gemini-1.5-flash");

        assert_eq!(client.api_key, "key-test");
        assert_eq!(client.base_url(), "https://custom.api.com");
        assert_eq!(client.model(), "gemini-1.5-flash");
    }

    #[test]
    fn test_default_model() {
        let client = GeminiClient::new("key");
        assert_eq!(client.model(), GEMINI_1_5_PRO);
        assert_eq!(client.generation_config, GenerationConfig::default());
    }
}
