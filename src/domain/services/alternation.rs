//! Rewrites a flat transcript into the strictly alternating shape required by
//! chat-session providers: `user, model, user, model, …` starting with `user`,
//! with the newest user turn held back as the prompt.

use tracing::{debug, warn};

use crate::domain::{AlternatingConversation, ChatTurn, DomainError, Message, Role, TurnRole};

pub const MISSING_PROMPT_MESSAGE: &str =
    "Invalid conversation history format: Missing latest user message.";

/// Normalize `messages` for a strict-alternation provider.
///
/// Leading messages before the first user turn are skipped silently. After
/// that, any message that breaks the alternation is dropped with a warning and
/// counted in [`AlternatingConversation::dropped`]. The last accumulated turn
/// must be a user turn; it becomes the prompt.
pub fn normalize_alternating(messages: &[Message]) -> Result<AlternatingConversation, DomainError> {
    let mut turns: Vec<ChatTurn> = Vec::with_capacity(messages.len());
    let mut expecting_user = true;
    let mut dropped = 0;

    let start = messages
        .iter()
        .position(Message::is_user)
        .unwrap_or(messages.len());
    if start > 0 {
        debug!("Skipping {} leading message(s) before the first user turn", start);
    }

    for (index, message) in messages.iter().enumerate().skip(start) {
        match (message.role(), expecting_user) {
            (Role::User, true) => {
                turns.push(ChatTurn::user(message.content()));
                expecting_user = false;
            }
            (Role::Assistant, false) => {
                turns.push(ChatTurn::model(message.content()));
                expecting_user = true;
            }
            (role, _) => {
                warn!(
                    "Skipping message {} with role \"{}\" due to unexpected order or role",
                    index, role
                );
                dropped += 1;
            }
        }
    }

    match turns.pop() {
        Some(last) if last.role() == TurnRole::User => {
            Ok(AlternatingConversation::new(turns, last.into_text(), dropped))
        }
        _ => Err(DomainError::invalid_format(MISSING_PROMPT_MESSAGE)),
    }
}
