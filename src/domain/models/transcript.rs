use serde::{Deserialize, Serialize};

use super::{Message, Role};
use crate::domain::DomainError;

pub const EMPTY_TRANSCRIPT_MESSAGE: &str = "Invalid or empty messages array provided.";

/// Ordered, append-only list of chat turns exchanged so far. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Message>", into = "Vec<Message>")]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new(messages: Vec<Message>) -> Result<Self, DomainError> {
        if messages.is_empty() {
            return Err(DomainError::invalid_input(EMPTY_TRANSCRIPT_MESSAGE));
        }
        Ok(Self { messages })
    }

    /// Starts a transcript from a single seed message.
    pub fn seeded(first: Message) -> Self {
        Self {
            messages: vec![first],
        }
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Removes the newest message. The first message is never removed.
    pub fn pop(&mut self) -> Option<Message> {
        if self.messages.len() > 1 {
            self.messages.pop()
        } else {
            None
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn count_role(&self, role: Role) -> usize {
        self.messages.iter().filter(|m| m.role() == role).count()
    }
}

impl TryFrom<Vec<Message>> for Transcript {
    type Error = DomainError;

    fn try_from(messages: Vec<Message>) -> Result<Self, Self::Error> {
        Self::new(messages)
    }
}

impl From<Transcript> for Vec<Message> {
    fn from(transcript: Transcript) -> Self {
        transcript.messages
    }
}
