pub mod payloads;
pub mod server;

pub use payloads::{ChatRequest, Envelope};
pub use server::{routes, serve, ChatInput, CHAT_PATH, HEALTH_PATH, VALIDATE_PATH};
