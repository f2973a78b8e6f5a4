//! Core types and traits: Handler, Bot, Message, HandlerResponse, error, logger. Transport-agnostic.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{parse_message_id, Bot};
pub use error::{BotError, Result};
pub use logger::{init_file_tracing, init_tracing};
pub use types::{
    Chat, ChatKind, Handler, HandlerResponse, Message, MessageDirection, MessageKind,
    ToCoreMessage, User,
};
