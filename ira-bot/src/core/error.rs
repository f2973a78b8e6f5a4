//! Error types for the bot core.
//!
//! [`BotError`] covers transport, chat-service, config and IO failures inside the handler chain.

use ira_client::IraError;
use thiserror::Error;

/// Top-level error (bot transport, chat service, config, IO).
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Chat service error: {0}")]
    Chat(#[from] IraError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for core operations; uses [`BotError`].
pub type Result<T> = std::result::Result<T, BotError>;
