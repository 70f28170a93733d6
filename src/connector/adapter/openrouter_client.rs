use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::provider_error;
use crate::application::ChatProvider;
use crate::domain::{DomainError, Message, Transcript};

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "deepseek/deepseek-chat:free";
const COMPLETIONS_PATH: &str = "/chat/completions";
const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 500;
const VENDOR: &str = "OpenRouter";

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    max_tokens: u32,
}

/// Flat-list chat-completion backend (OpenRouter or any OpenAI-compatible
/// endpoint).
///
/// The transcript is forwarded verbatim, system messages included; the
/// provider deals with role ordering itself.
pub struct OpenRouterClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    /// Full endpoint URL (base + COMPLETIONS_PATH).
    url: String,
}

impl OpenRouterClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), COMPLETIONS_PATH);
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            model: model.into(),
            url,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn extract_reply(payload: &Value) -> Result<String, DomainError> {
        if let Some(message) = provider_error::error_message(payload) {
            return Err(DomainError::provider_with_details(message, payload.clone()));
        }

        payload
            .get("choices")
            .and_then(Value::as_array)
            .and_then(|choices| choices.first())
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                DomainError::provider_with_details(
                    "OpenRouter response contained no reply.",
                    payload.clone(),
                )
            })
    }
}

#[async_trait]
impl ChatProvider for OpenRouterClient {
    async fn reply(&self, transcript: &Transcript) -> Result<String, DomainError> {
        let request = ApiRequest {
            model: &self.model,
            messages: transcript.messages(),
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| provider_error::from_transport(VENDOR, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| provider_error::from_transport(VENDOR, e))?;

        if !status.is_success() {
            return Err(provider_error::from_error_body(VENDOR, status, &body));
        }

        let payload: Value = serde_json::from_str(&body).map_err(|e| {
            DomainError::provider(format!("{VENDOR}: failed to parse response: {e}"))
        })?;

        let reply = Self::extract_reply(&payload)?;
        debug!("{VENDOR} ({}) response: {}", self.model, reply);
        Ok(reply)
    }

    fn name(&self) -> &str {
        "openrouter"
    }
}
