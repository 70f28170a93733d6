use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    InvalidFormat(String),

    #[error("{message}")]
    Provider {
        message: String,
        details: Option<Value>,
    },

    #[error("Server configuration error: {0}")]
    Configuration(String),
}

impl DomainError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn invalid_format(msg: impl Into<String>) -> Self {
        Self::InvalidFormat(msg.into())
    }

    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider {
            message: msg.into(),
            details: None,
        }
    }

    pub fn provider_with_details(msg: impl Into<String>, details: Value) -> Self {
        Self::Provider {
            message: msg.into(),
            details: Some(details),
        }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// True for errors caused by the caller's request rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::InvalidFormat(_))
    }
}
