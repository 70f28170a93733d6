mod gemini_client;
mod mock_provider;
mod openrouter_client;
mod provider_error;
mod relay_client;
mod unconfigured_provider;

pub use gemini_client::{ChatSession, GeminiClient};
pub use mock_provider::*;
pub use openrouter_client::OpenRouterClient;
pub use relay_client::*;
pub use unconfigured_provider::*;

pub mod gemini {
    pub use super::gemini_client::{DEFAULT_BASE_URL, DEFAULT_MODEL};
}

pub mod openrouter {
    pub use super::openrouter_client::{DEFAULT_BASE_URL, DEFAULT_MODEL};
}
