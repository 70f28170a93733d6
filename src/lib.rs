pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use cli::Commands;

pub use application::{ChatProvider, ConversationUseCase, RelayChatUseCase};

pub use connector::{
    ChatSession, GeminiClient, MockChatProvider, OpenRouterClient, RelayClient,
    UnconfiguredProvider,
};

pub use connector::api::{
    ApiError, Container, ContainerConfig, MissingCredentialPolicy, ProviderKind, Router,
};

pub use domain::{
    normalize_alternating, AlternatingConversation, ChatTurn, DomainError, Message, Role,
    Transcript, TurnRole,
};
