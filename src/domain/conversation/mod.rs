//! Conversation domain - chat transcript for the copilot drawer.

mod log;
mod message;

pub use log::{ConversationLog, WELCOME_MESSAGE};
pub use message::{ChatMessage, Role};
