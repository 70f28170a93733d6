use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::application::ChatProvider;
use crate::domain::{DomainError, Message, Transcript};

/// Forwards a caller-supplied transcript to the configured provider and
/// returns the assistant reply. Stateless: every call carries the full
/// transcript.
pub struct RelayChatUseCase {
    provider: Arc<dyn ChatProvider>,
}

impl RelayChatUseCase {
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self { provider }
    }

    pub async fn execute(&self, messages: Vec<Message>) -> Result<String, DomainError> {
        let transcript = Transcript::new(messages)?;

        info!(
            "Relaying transcript of {} message(s) to {}",
            transcript.len(),
            self.provider.name()
        );
        debug!("Transcript received: {:?}", transcript.messages());

        let start_time = Instant::now();
        let reply = self.provider.reply(&transcript).await;
        let elapsed = start_time.elapsed();

        match &reply {
            Ok(text) => info!(
                "Provider {} replied with {} chars in {:.2?}",
                self.provider.name(),
                text.len(),
                elapsed
            ),
            Err(e) => warn!(
                "Provider {} failed after {:.2?}: {}",
                self.provider.name(),
                elapsed,
                e
            ),
        }

        reply
    }

    pub fn ensure_configured(&self) -> Result<(), DomainError> {
        self.provider.ensure_configured()
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ChatProvider for CountingProvider {
        async fn reply(&self, transcript: &Transcript) -> Result<String, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("seen {}", transcript.len()))
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    #[tokio::test]
    async fn test_empty_transcript_never_reaches_provider() {
        let provider = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
        });
        let use_case = RelayChatUseCase::new(provider.clone());

        let err = use_case.execute(vec![]).await.unwrap_err();

        assert!(err.is_client_error());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_reply_is_passed_through() {
        let provider = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
        });
        let use_case = RelayChatUseCase::new(provider.clone());

        let reply = use_case
            .execute(vec![Message::system("sys"), Message::user("Hi")])
            .await
            .unwrap();

        assert_eq!(reply, "seen 2");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        assert_eq!(use_case.provider_name(), "counting");
    }
}
