use std::sync::Arc;

use tracing::{debug, error};

use crate::application::ChatProvider;
use crate::domain::{DomainError, Message, Role, Transcript};

pub const WELLNESS_SYSTEM_PROMPT: &str = "You are a helpful assistant designed to help the user \
explore aspects of themselves and their emotions. Respond in a supportive and encouraging tone.";

pub const WELCOME_MESSAGE: &str =
    "Hi! I'm here to help you discover more about yourself. What would you like to explore today?";

/// Client-side transcript store: keeps the running conversation and submits
/// it in full on every turn.
pub struct ConversationUseCase {
    provider: Arc<dyn ChatProvider>,
    transcript: Transcript,
}

impl ConversationUseCase {
    pub fn new(provider: Arc<dyn ChatProvider>, transcript: Transcript) -> Self {
        Self {
            provider,
            transcript,
        }
    }

    /// Seeds the transcript with the wellness system prompt and the welcome
    /// greeting shown to the user.
    pub fn with_default_seed(provider: Arc<dyn ChatProvider>) -> Self {
        let mut transcript = Transcript::seeded(Message::system(WELLNESS_SYSTEM_PROMPT));
        transcript.push(Message::assistant(WELCOME_MESSAGE));
        Self::new(provider, transcript)
    }

    /// Sends one user turn. Blank input is ignored and yields `Ok(None)`.
    ///
    /// The user message is recorded before the provider is called and rolled
    /// back if the call fails, so a retry submits only the new turn.
    pub async fn send(&mut self, input: &str) -> Result<Option<String>, DomainError> {
        let text = input.trim();
        if text.is_empty() {
            return Ok(None);
        }

        self.transcript.push(Message::user(text));
        debug!("Submitting transcript of {} message(s)", self.transcript.len());

        match self.provider.reply(&self.transcript).await {
            Ok(reply) => {
                self.transcript.push(Message::assistant(reply.clone()));
                Ok(Some(reply))
            }
            Err(e) => {
                error!("Failed to get a reply: {}", e);
                self.transcript.pop();
                Err(e)
            }
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// The most recent assistant message, e.g. the greeting before any turn.
    pub fn last_assistant_message(&self) -> Option<&str> {
        self.transcript
            .messages()
            .iter()
            .rev()
            .find(|m| m.role() == Role::Assistant)
            .map(|m| m.content())
    }
}
