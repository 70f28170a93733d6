use async_trait::async_trait;
use tracing::error;

use crate::application::ChatProvider;
use crate::domain::{DomainError, Transcript};

const MISSING_KEY_MESSAGE: &str = "API key not set.";

/// Stands in for a provider whose credential is missing. Every call fails
/// with a configuration error instead of the process refusing to start.
pub struct UnconfiguredProvider {
    provider: String,
    credential: String,
}

impl UnconfiguredProvider {
    pub fn new(provider: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            credential: credential.into(),
        }
    }

    fn missing_credential(&self) -> DomainError {
        error!(
            "{} not found in environment variables; refusing {} request",
            self.credential, self.provider
        );
        DomainError::configuration(MISSING_KEY_MESSAGE)
    }
}

#[async_trait]
impl ChatProvider for UnconfiguredProvider {
    async fn reply(&self, _transcript: &Transcript) -> Result<String, DomainError> {
        Err(self.missing_credential())
    }

    fn ensure_configured(&self) -> Result<(), DomainError> {
        Err(self.missing_credential())
    }

    fn name(&self) -> &str {
        &self.provider
    }
}
