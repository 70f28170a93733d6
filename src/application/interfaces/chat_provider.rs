use async_trait::async_trait;

use crate::domain::{DomainError, Transcript};

/// Produces the assistant's next reply for a chat transcript.
///
/// Implementors own the vendor contract: a flat-list backend forwards the
/// transcript as-is, a chat-session backend rewrites it into strict
/// user/model alternation first. Consumers only ever hand over the full
/// transcript and get back the reply text.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn reply(&self, transcript: &Transcript) -> Result<String, DomainError>;

    /// Fails when the provider cannot serve any request, e.g. a missing
    /// credential. Checked before the request body is looked at.
    fn ensure_configured(&self) -> Result<(), DomainError> {
        Ok(())
    }

    /// Short name used in logs and the health endpoint.
    fn name(&self) -> &str;
}
