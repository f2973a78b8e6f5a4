//! Chat message types: the outgoing user message and the reply records the service echoes back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{IraError, Result};

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    /// Any role the service adds later (e.g. system notices).
    #[serde(other)]
    Other,
}

/// Outgoing message fields shared by every protocol variant. Built fresh for each request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub content: String,
    pub role: Role,
    /// ISO-8601 UTC with milliseconds, e.g. `2024-12-01T09:30:00.123Z`.
    pub timestamp: String,
    pub status: String,
    #[serde(rename = "type")]
    pub message_type: String,
}

impl ChatMessage {
    /// A user-authored text message stamped with `timestamp`.
    pub fn user(content: impl Into<String>, timestamp: String) -> Self {
        Self {
            content: content.into(),
            role: Role::User,
            timestamp,
            status: "sent".to_string(),
            message_type: "text_message".to_string(),
        }
    }
}

/// One message record from a chat response. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReplyMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

impl ReplyMessage {
    pub fn is_assistant(&self) -> bool {
        self.role == Some(Role::Assistant)
    }

    /// Content if present and non-blank.
    pub fn text(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.trim().is_empty())
    }
}

/// Accepted response shapes: a bare array, or an object wrapping it under `messages`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ReplyEnvelope {
    List(Vec<ReplyMessage>),
    Wrapped { messages: Vec<ReplyMessage> },
}

/// Parses a 200 chat response body into its message records, preserving order.
pub fn parse_replies(body: &str) -> Result<Vec<ReplyMessage>> {
    match serde_json::from_str::<ReplyEnvelope>(body) {
        Ok(ReplyEnvelope::List(messages)) | Ok(ReplyEnvelope::Wrapped { messages }) => Ok(messages),
        Err(e) => Err(IraError::UnexpectedResponse(format!(
            "chat response is not a message list: {}",
            e
        ))),
    }
}

/// Joins reply contents with a single space, in arrival order. Blank contents are skipped.
pub fn join_replies(replies: &[ReplyMessage]) -> String {
    replies
        .iter()
        .filter_map(ReplyMessage::text)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Formats `at` as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Fresh 24-char lowercase hex conversation id, every character random.
///
/// Built from the 12 bytes of a v4 UUID that carry no version or variant bits (bytes 6 and 8 do).
pub fn new_chemistry_id() -> String {
    let bytes = *uuid::Uuid::new_v4().as_bytes();
    bytes[..6]
        .iter()
        .chain(&bytes[10..])
        .map(|b| format!("{:02x}", b))
        .collect()
}
