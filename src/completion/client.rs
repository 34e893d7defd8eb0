//! OpenAI-compatible chat completion client.

use std::time::Duration;

use async_trait::async_trait;

use crate::completion::types::{ChatCompletionRequest, ChatCompletionResponse, ProviderErrorBody};
use crate::completion::{ChatChoice, ChatCompletion, ChatMessage, CompletionError};
use crate::config::CompletionConfig;

/// Calls `POST {base_url}/chat/completions` with a bearer API key.
#[derive(Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl OpenAiClient {
    pub fn new(config: &CompletionConfig) -> Result<Self, CompletionError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key: config.api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[async_trait]
impl ChatCompletion for OpenAiClient {
    async fn complete(&self, messages: &[ChatMessage], model: &str) -> Result<ChatChoice, CompletionError> {
        let api_key = self.api_key.as_deref().ok_or(CompletionError::MissingApiKey)?;

        tracing::debug!(model, messages = messages.len(), endpoint = %self.endpoint, "Requesting chat completion");

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&ChatCompletionRequest { model, messages })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ProviderErrorBody>(&body) {
                Ok(parsed) => parsed.error.message,
                Err(_) if body.trim().is_empty() => {
                    status.canonical_reason().unwrap_or("upstream error").to_string()
                }
                Err(_) => body,
            };
            tracing::warn!(status = %status, message = %message, "Chat completion rejected by provider");
            return Err(CompletionError::Upstream { status, message });
        }

        let body: ChatCompletionResponse = response.json().await?;
        let choice = body.choices.into_iter().next().ok_or(CompletionError::EmptyChoices)?;

        tracing::debug!(model, finish_reason = ?choice.finish_reason, "Chat completion received");
        Ok(choice)
    }
}
