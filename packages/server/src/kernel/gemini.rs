//! Gemini adapter for [`BaseAI`].

use async_trait::async_trait;
use gemini_client::GeminiClient;
use tracing::debug;

use super::BaseAI;
use crate::common::{PipelineError, PipelineResult, RetryPolicy};

const SERVICE: &str = "language model";

pub struct GeminiAI {
    client: GeminiClient,
    retry: RetryPolicy,
}

impl GeminiAI {
    pub fn new(client: GeminiClient, retry: RetryPolicy) -> Self {
        Self { client, retry }
    }
}

#[async_trait]
impl BaseAI for GeminiAI {
    async fn complete(&self, prompt: &str) -> PipelineResult<String> {
        debug!(model = %self.client.model(), prompt_chars = prompt.len(), "Gemini text request");
        self.retry
            .run(SERVICE, || async {
                self.client
                    .generate_text(prompt)
                    .await
                    .map_err(PipelineError::from)
            })
            .await
    }

    async fn complete_json(&self, prompt: &str) -> PipelineResult<String> {
        debug!(model = %self.client.model(), prompt_chars = prompt.len(), "Gemini JSON request");
        self.retry
            .run(SERVICE, || async {
                self.client
                    .generate_json(prompt)
                    .await
                    .map_err(PipelineError::from)
            })
            .await
    }
}
