use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::provider_error;
use crate::application::ChatProvider;
use crate::domain::{normalize_alternating, ChatTurn, DomainError, Transcript};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";
const API_VERSION_PATH: &str = "/v1beta/models";
const API_KEY_HEADER: &str = "x-goog-api-key";
const VENDOR: &str = "Gemini";

#[derive(Serialize)]
struct ApiRequest<'a> {
    contents: Vec<ApiContent<'a>>,
}

#[derive(Serialize)]
struct ApiContent<'a> {
    role: &'a str,
    parts: [ApiPart<'a>; 1],
}

#[derive(Serialize)]
struct ApiPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Chat-session backend for the Gemini `generateContent` API.
///
/// Gemini requires history to alternate `user`/`model` starting with `user`,
/// so every transcript goes through [`normalize_alternating`] first. The
/// normalized history seeds a [`ChatSession`] and the withheld final user
/// turn is sent as the new prompt.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    /// Full endpoint URL for `generateContent` on the configured model.
    url: String,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let base: String = base_url.into();
        let model: String = model.into();
        let url = format!(
            "{}{}/{}:generateContent",
            base.trim_end_matches('/'),
            API_VERSION_PATH,
            model
        );
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            model,
            url,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Opens a session primed with prior turns. The history must already
    /// alternate correctly.
    pub fn start_chat(&self, history: Vec<ChatTurn>) -> ChatSession<'_> {
        ChatSession {
            client: self,
            history,
        }
    }

    async fn generate(&self, contents: &[ChatTurn]) -> Result<String, DomainError> {
        let request = ApiRequest {
            contents: contents
                .iter()
                .map(|turn| ApiContent {
                    role: turn.role().as_str(),
                    parts: [ApiPart { text: turn.text() }],
                })
                .collect(),
        };

        let response = self
            .client
            .post(&self.url)
            .header(API_KEY_HEADER, &self.api_key)
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

        Self::extract_reply(&body)
    }

    fn extract_reply(body: &str) -> Result<String, DomainError> {
        let api_response: ApiResponse = serde_json::from_str(body).map_err(|e| {
            DomainError::provider(format!("{VENDOR}: failed to parse response: {e}"))
        })?;

        let text: String = api_response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.is_empty() {
            let details = serde_json::from_str::<Value>(body).unwrap_or(Value::Null);
            return Err(DomainError::provider_with_details(
                "Gemini response contained no reply text.",
                details,
            ));
        }

        Ok(text)
    }
}

/// A conversation opened against [`GeminiClient`]. Mirrors the vendor's
/// chat-session API: history is fixed at start, each prompt is sent on top.
pub struct ChatSession<'a> {
    client: &'a GeminiClient,
    history: Vec<ChatTurn>,
}

impl ChatSession<'_> {
    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    /// Sends `prompt` as the next user turn. On success both the prompt and
    /// the reply are appended to the session history.
    pub async fn send_message(&mut self, prompt: &str) -> Result<String, DomainError> {
        let mut contents = self.history.clone();
        contents.push(ChatTurn::user(prompt));

        let reply = self.client.generate(&contents).await?;

        self.history = contents;
        self.history.push(ChatTurn::model(reply.clone()));
        Ok(reply)
    }
}

#[async_trait]
impl ChatProvider for GeminiClient {
    async fn reply(&self, transcript: &Transcript) -> Result<String, DomainError> {
        let conversation = normalize_alternating(transcript.messages())?;
        if conversation.dropped() > 0 {
            info!(
                "Dropped {} out-of-order message(s) before calling {}",
                conversation.dropped(),
                self.model
            );
        }

        let (history, prompt) = conversation.into_parts();
        let mut session = self.start_chat(history);
        let reply = session.send_message(&prompt).await?;

        debug!("{VENDOR} ({}) response: {}", self.model, reply);
        Ok(reply)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Message;

    #[test]
    fn test_url_includes_model() {
        let client = GeminiClient::new(
            "k",
            DEFAULT_MODEL,
            "http://localhost:9/",
            Duration::from_secs(1),
        );
        assert_eq!(
            client.url(),
            "http://localhost:9/v1beta/models/gemini-1.5-flash-latest:generateContent"
        );
    }

    #[test]
    fn test_extract_reply_joins_parts() {
        let body = r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Hello "},{"text":"there"}]}}]}"#;
        assert_eq!(GeminiClient::extract_reply(body).unwrap(), "Hello there");
    }

    #[test]
    fn test_extract_reply_rejects_blocked_response() {
        let body = r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#;
        let err = GeminiClient::extract_reply(body).unwrap_err();
        match err {
            DomainError::Provider { details, .. } => {
                assert_eq!(details.unwrap()["promptFeedback"]["blockReason"], "SAFETY");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_format_error_short_circuits_before_network() {
        // Unroutable base URL: reaching the network would surface a provider error.
        let client = GeminiClient::new(
            "k",
            DEFAULT_MODEL,
            "http://127.0.0.1:1",
            Duration::from_secs(1),
        );
        let transcript =
            Transcript::new(vec![Message::user("Hi"), Message::assistant("Hello")]).unwrap();

        let err = client.reply(&transcript).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidFormat(_)));
    }
}
