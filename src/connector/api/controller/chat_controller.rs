use serde_json::Value;

use super::super::dto::{messages_from_payload, ChatReply};
use super::super::error::ApiError;
use super::super::Container;

pub struct ChatController<'a> {
    container: &'a Container,
}

impl<'a> ChatController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Rejects every request up front when the provider is unusable.
    pub fn ensure_configured(&self) -> Result<(), ApiError> {
        Ok(self.container.relay_use_case().ensure_configured()?)
    }

    pub async fn chat(&self, payload: Value) -> Result<ChatReply, ApiError> {
        let messages = messages_from_payload(payload)?;

        let use_case = self.container.relay_use_case();
        let reply = use_case.execute(messages).await?;

        Ok(ChatReply { reply })
    }
}
