use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::ValueEnum;
use tracing::{debug, warn};

use crate::application::{ChatProvider, RelayChatUseCase};
use crate::connector::adapter::{
    gemini, openrouter, GeminiClient, MockChatProvider, OpenRouterClient, UnconfiguredProvider,
};
use crate::domain::DomainError;

/// Which upstream LLM backend the relay talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderKind {
    /// Chat-session API with strict user/model alternation.
    Gemini,
    /// Flat-list chat-completion API.
    #[value(name = "openrouter")]
    OpenRouter,
    /// Offline echo provider.
    Mock,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::OpenRouter => "openrouter",
            ProviderKind::Mock => "mock",
        }
    }

    /// Environment variable holding this provider's credential.
    pub fn credential_var(&self) -> Option<&'static str> {
        match self {
            ProviderKind::Gemini => Some("GOOGLE_API_KEY"),
            ProviderKind::OpenRouter => Some("OPENROUTER_API_KEY"),
            ProviderKind::Mock => None,
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => gemini::DEFAULT_MODEL,
            ProviderKind::OpenRouter => openrouter::DEFAULT_MODEL,
            ProviderKind::Mock => "mock",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => gemini::DEFAULT_BASE_URL,
            ProviderKind::OpenRouter => openrouter::DEFAULT_BASE_URL,
            ProviderKind::Mock => "",
        }
    }
}

/// What to do when the selected provider has no credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MissingCredentialPolicy {
    /// Refuse to start (always-running server).
    FailFast,
    /// Start anyway and fail each relay call with a configuration error
    /// (on-demand deployment).
    PerRequest,
}

/// Process-wide settings, resolved once at startup.
#[derive(Debug, Clone)]
pub struct ContainerConfig {
    pub provider: ProviderKind,
    pub google_api_key: Option<String>,
    pub openrouter_api_key: Option<String>,
    /// Overrides the provider's default model identifier.
    pub model: Option<String>,
    /// Overrides the provider's default API base URL.
    pub base_url: Option<String>,
    /// Upper bound for a single upstream call.
    pub timeout: Duration,
    pub missing_credential: MissingCredentialPolicy,
}

impl ContainerConfig {
    pub fn new(provider: ProviderKind) -> Self {
        Self {
            provider,
            google_api_key: None,
            openrouter_api_key: None,
            model: None,
            base_url: None,
            timeout: Duration::from_secs(30),
            missing_credential: MissingCredentialPolicy::FailFast,
        }
    }

    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }

    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.provider.default_base_url())
    }

    /// The credential for the selected provider, ignoring blank values.
    pub fn api_key(&self) -> Option<&str> {
        let key = match self.provider {
            ProviderKind::Gemini => self.google_api_key.as_deref(),
            ProviderKind::OpenRouter => self.openrouter_api_key.as_deref(),
            ProviderKind::Mock => None,
        };
        key.filter(|k| !k.trim().is_empty())
    }
}

pub struct Container {
    provider: Arc<dyn ChatProvider>,
    config: ContainerConfig,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Result<Self> {
        let provider = Self::build_provider(&config)?;
        Ok(Self { provider, config })
    }

    /// Wire an explicit provider, bypassing credential handling.
    pub fn with_provider(config: ContainerConfig, provider: Arc<dyn ChatProvider>) -> Self {
        Self { provider, config }
    }

    fn build_provider(config: &ContainerConfig) -> Result<Arc<dyn ChatProvider>, DomainError> {
        if config.provider == ProviderKind::Mock {
            debug!("Using mock chat provider");
            return Ok(Arc::new(MockChatProvider::new()));
        }

        let credential = config.provider.credential_var().unwrap_or("API key");
        let Some(api_key) = config.api_key() else {
            return match config.missing_credential {
                MissingCredentialPolicy::FailFast => Err(DomainError::configuration(format!(
                    "{credential} not found in your environment variables. \
                     Set {credential}=YOUR_SECRET_KEY before starting the server."
                ))),
                MissingCredentialPolicy::PerRequest => {
                    warn!(
                        "{} not found in environment variables. Chat requests will fail until it is set.",
                        credential
                    );
                    Ok(Arc::new(UnconfiguredProvider::new(
                        config.provider.as_str(),
                        credential,
                    )))
                }
            };
        };

        debug!(
            "Using {} provider at {} with model {}",
            config.provider.as_str(),
            config.base_url(),
            config.model()
        );

        Ok(match config.provider {
            ProviderKind::Gemini => Arc::new(GeminiClient::new(
                api_key,
                config.model(),
                config.base_url(),
                config.timeout,
            )),
            ProviderKind::OpenRouter => Arc::new(OpenRouterClient::new(
                api_key,
                config.model(),
                config.base_url(),
                config.timeout,
            )),
            ProviderKind::Mock => unreachable!("mock provider is handled above"),
        })
    }

    pub fn relay_use_case(&self) -> RelayChatUseCase {
        RelayChatUseCase::new(self.provider.clone())
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn provider_kind(&self) -> ProviderKind {
        self.config.provider
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }
}
