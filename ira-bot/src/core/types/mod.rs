//! Core types: user, chat, message, handler response, and the Handler trait.

mod chat;
mod handler;
mod message;
mod response;
mod user;

pub use chat::{Chat, ChatKind};
pub use handler::{Handler, ToCoreMessage};
pub use message::{Message, MessageDirection, MessageKind};
pub use response::HandlerResponse;
pub use user::User;
