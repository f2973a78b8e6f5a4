//! # Ira bot
//!
//! Telegram front end for the Ira chat service. Incoming updates become core [`Message`]s and run
//! through a [`HandlerChain`]: logging, the `/start` greeting, then the relay to Ira via
//! [`ira_client::ChatClient`]. Also ships a terminal chat loop.

pub mod chain;
pub mod cli;
pub mod config;
pub mod core;
pub mod handlers;
pub mod repl;
pub mod runner;
pub mod telegram;

pub use cli::{load_config, Cli, Commands};

pub use core::{
    init_file_tracing, init_tracing, parse_message_id, Bot, BotError, Chat, ChatKind, Handler,
    HandlerResponse, Message, MessageDirection, MessageKind, Result, ToCoreMessage, User,
};

pub use chain::HandlerChain;

pub use telegram::{run_repl, TelegramBotAdapter, TelegramMessageWrapper};

pub use config::{BotConfig, DEFAULT_GREETING};
pub use handlers::{
    split_message, IraChatHandler, LoggingHandler, StartHandler, StreamEditor,
    TELEGRAM_MESSAGE_LIMIT,
};
pub use repl::{run_chat, run_chat_with};
pub use runner::{build_handler_chain, build_teloxide_bot, prepare_client, run_bot};
