use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::application::ChatProvider;
use crate::connector::api::dto::{ChatReply, ChatRequest, ErrorBody};
use crate::domain::{DomainError, Transcript};

pub const DEFAULT_RELAY_URL: &str = "http://localhost:3001/api/chat";

/// Talks to a running relay endpoint, so a conversation can be driven from
/// the terminal exactly like the browser client does.
pub struct RelayClient {
    client: reqwest::Client,
    url: String,
}

impl RelayClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ChatProvider for RelayClient {
    async fn reply(&self, transcript: &Transcript) -> Result<String, DomainError> {
        let request = ChatRequest {
            messages: transcript.messages(),
        };

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::provider(format!("relay request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body: ErrorBody = response.json().await.unwrap_or_else(|_| ErrorBody {
                error: format!("relay returned {status}"),
                details: None,
            });
            warn!("Relay error {}: {}", status, body.error);

            return Err(if status.is_client_error() {
                DomainError::invalid_input(body.error)
            } else {
                DomainError::Provider {
                    message: body.error,
                    details: body.details,
                }
            });
        }

        let reply: ChatReply = response
            .json()
            .await
            .map_err(|e| DomainError::provider(format!("failed to parse relay reply: {e}")))?;
        debug!("Relay reply: {}", reply.reply);

        Ok(reply.reply)
    }

    fn name(&self) -> &str {
        "relay"
    }
}
