pub mod container;
pub mod controller;
pub mod dto;
pub mod error;
pub mod http;
pub mod router;

pub use container::{Container, ContainerConfig, MissingCredentialPolicy, ProviderKind};
pub use error::ApiError;
pub use router::Router;
