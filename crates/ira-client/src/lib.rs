//! # Ira client
//!
//! Credential lifecycle and chat protocol for the Ira conversational service:
//!
//! - [`CredentialStore`] loads the bearer token + user id from a JSON file and recovers from a
//!   missing, corrupt or incomplete file through a bounded refresh-token exchange ([`TokenIssuer`]).
//! - [`ChatClient`] relays one user message through a [`ChatBackend`] (one per wire-protocol
//!   variant) and re-authenticates once when the token has expired.
//!
//! Transport-agnostic; used by the ira-bot Telegram front end and its terminal REPL.

pub mod backend;
mod client;
mod config;
mod credential;
mod error;
mod http;
mod issuer;
mod mask;
mod message;
mod store;

pub use backend::{ChatBackend, DataV3Backend, LegacyBackend};
pub use client::{ChatClient, StreamChunk};
pub use config::{
    IraConfig, Protocol, DEFAULT_CREDENTIALS_FILE, DEFAULT_LEGACY_CHAT_URL, DEFAULT_TOKEN_URL,
    DEFAULT_V3_CHAT_URL,
};
pub use credential::{read_credential_file, write_credential_file, Credential};
pub use error::{IraError, Result};
pub use http::build_http_client;
pub use issuer::{SecureTokenIssuer, TokenIssuer};
pub use mask::mask_token;
pub use message::{
    format_timestamp, join_replies, new_chemistry_id, parse_replies, ChatMessage, ReplyMessage,
    Role,
};
pub use store::CredentialStore;
