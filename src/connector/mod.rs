//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Provider adapters (Gemini chat sessions, OpenRouter completions, mock)
//! - HTTP relay surface (axum routes, controllers, wire types)
//! - Relay client for driving a conversation from the terminal

pub mod adapter;
pub mod api;

pub use adapter::*;
