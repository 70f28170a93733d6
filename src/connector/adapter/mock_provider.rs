use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;

use crate::application::ChatProvider;
use crate::domain::{DomainError, Role, Transcript};

/// Offline provider for local development and tests.
///
/// Replies by echoing the latest user message, or fails every call with a
/// fixed provider error when built with [`MockChatProvider::failing`].
pub struct MockChatProvider {
    failure: Option<(String, Option<Value>)>,
    calls: AtomicUsize,
}

impl MockChatProvider {
    pub fn new() -> Self {
        Self {
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: impl Into<String>, details: Option<Value>) -> Self {
        Self {
            failure: Some((message.into(), details)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockChatProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatProvider for MockChatProvider {
    async fn reply(&self, transcript: &Transcript) -> Result<String, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some((message, details)) = &self.failure {
            return Err(DomainError::Provider {
                message: message.clone(),
                details: details.clone(),
            });
        }

        let latest = transcript
            .messages()
            .iter()
            .rev()
            .find(|m| m.role() == Role::User)
            .map(|m| m.content())
            .unwrap_or("");

        Ok(format!("You said: {}", latest))
    }

    fn name(&self) -> &str {
        "mock"
    }
}
