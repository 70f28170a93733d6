//! Wire shapes of the relay endpoint, shared by the server and the client.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{DomainError, Message, EMPTY_TRANSCRIPT_MESSAGE};

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub messages: &'a [Message],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    /// Present (possibly `null`) only for provider failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub provider: String,
}

/// Pull the `messages` list out of a decoded request payload.
///
/// A bare array is accepted as the list itself. Anything that is not a
/// non-empty list of `{role, content}` objects is a client input error.
pub fn messages_from_payload(payload: Value) -> Result<Vec<Message>, DomainError> {
    let items = match payload {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("messages") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };

    if items.is_empty() {
        return Err(DomainError::invalid_input(EMPTY_TRANSCRIPT_MESSAGE));
    }

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<Message>(item).map_err(|e| {
                DomainError::invalid_input(format!("Invalid message at index {index}: {e}"))
            })
        })
        .collect()
}
