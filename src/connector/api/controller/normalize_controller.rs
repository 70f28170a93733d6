use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{json, Value};

use crate::connector::api::dto::messages_from_payload;
use crate::domain::{normalize_alternating, Transcript};

use super::super::container::ProviderKind;
use super::super::Container;

/// Shows what the configured provider would receive for a transcript file,
/// without calling it.
pub struct NormalizeController<'a> {
    container: &'a Container,
}

impl<'a> NormalizeController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn normalize(&self, path: &Path) -> Result<String> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read transcript file: {}", path.display()))?;
        let payload: Value = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse transcript JSON: {}", path.display()))?;

        let transcript = Transcript::new(messages_from_payload(payload)?)?;
        let output = self.render(&transcript)?;

        Ok(serde_json::to_string_pretty(&output)?)
    }

    fn render(&self, transcript: &Transcript) -> Result<Value> {
        let config = self.container.config();
        match self.container.provider_kind() {
            ProviderKind::Gemini => {
                let conversation = normalize_alternating(transcript.messages())?;
                Ok(json!({
                    "provider": "gemini",
                    "model": config.model(),
                    "history": conversation.history(),
                    "prompt": conversation.prompt(),
                    "dropped": conversation.dropped(),
                }))
            }
            kind => Ok(json!({
                "provider": kind.as_str(),
                "model": config.model(),
                "messages": transcript.messages(),
            })),
        }
    }
}
