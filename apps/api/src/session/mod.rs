//! Conversation history and per-session state.

pub mod conversation;
pub mod handlers;
pub mod store;

pub use conversation::ConversationEntry;
pub use store::{AnalysisReport, SessionStore};
