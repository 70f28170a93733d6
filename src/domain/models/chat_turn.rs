use serde::{Deserialize, Serialize};

/// Speaker tag used by providers that require strict user/model alternation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Model,
}

impl TurnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Model => "model",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    role: TurnRole,
    text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Model,
            text: text.into(),
        }
    }

    pub fn role(&self) -> TurnRole {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// A transcript rewritten for a strict-alternation provider: prior context
/// plus the newest user prompt, submitted separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternatingConversation {
    history: Vec<ChatTurn>,
    prompt: String,
    dropped: usize,
}

impl AlternatingConversation {
    pub fn new(history: Vec<ChatTurn>, prompt: impl Into<String>, dropped: usize) -> Self {
        Self {
            history,
            prompt: prompt.into(),
            dropped,
        }
    }

    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Number of out-of-order messages discarded during normalization.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn into_parts(self) -> (Vec<ChatTurn>, String) {
        (self.history, self.prompt)
    }
}
