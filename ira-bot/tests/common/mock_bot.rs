//! Mock implementation of [`ira_bot::Bot`] for integration tests.
//!
//! Records sent texts and edits so tests can assert on what the user would see
//! without hitting Telegram.

use async_trait::async_trait;
use ira_bot::{Bot, BotError, Chat, Message, Result};
use std::sync::Mutex;

/// One recorded call to `edit_message(chat, message_id, text)`.
#[derive(Debug, Clone, PartialEq)]
pub struct EditRecord {
    pub chat_id: i64,
    pub message_id: String,
    pub text: String,
}

/// Mock Bot that records sends and edits and returns a fixed placeholder message id.
#[derive(Default)]
pub struct MockBot {
    sent: Mutex<Vec<String>>,
    edits: Mutex<Vec<EditRecord>>,
    /// When set, every edit fails with this error text.
    edit_error: Option<String>,
}

impl MockBot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_edits(error: &str) -> Self {
        Self {
            edit_error: Some(error.to_string()),
            ..Self::default()
        }
    }

    /// Texts passed to send_message, reply_to and send_message_and_return_id, in order.
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    pub fn edits(&self) -> Vec<EditRecord> {
        self.edits.lock().unwrap().clone()
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, _chat: &Chat, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }

    async fn reply_to(&self, _message: &Message, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }

    async fn edit_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()> {
        self.edits.lock().unwrap().push(EditRecord {
            chat_id: chat.id,
            message_id: message_id.to_string(),
            text: text.to_string(),
        });
        match &self.edit_error {
            Some(e) => Err(BotError::Bot(e.clone())),
            None => Ok(()),
        }
    }

    async fn send_message_and_return_id(&self, _chat: &Chat, text: &str) -> Result<String> {
        self.sent.lock().unwrap().push(text.to_string());
        Ok("1".to_string())
    }
}
