mod chat_turn;
mod message;
mod transcript;

pub use chat_turn::*;
pub use message::*;
pub use transcript::*;
