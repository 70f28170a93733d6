mod conversation;
mod relay_chat;

pub use conversation::*;
pub use relay_chat::*;
