pub mod chat_controller;
pub mod normalize_controller;

pub use chat_controller::ChatController;
pub use normalize_controller::NormalizeController;
