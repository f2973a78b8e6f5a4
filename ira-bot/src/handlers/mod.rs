//! Handlers run by the chain: logging, /start greeting, and the Ira chat relay.

mod chat_handler;
mod logging_handler;
mod split;
mod start_handler;
mod stream_edit;

pub use chat_handler::{IraChatHandler, EMPTY_REPLY_TEXT};
pub use logging_handler::LoggingHandler;
pub use split::{split_message, TELEGRAM_MESSAGE_LIMIT};
pub use start_handler::StartHandler;
pub use stream_edit::{is_message_not_modified_error, StreamEditor};
