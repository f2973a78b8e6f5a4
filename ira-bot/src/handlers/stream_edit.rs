//! Edits a placeholder message in place as reply fragments arrive.
//!
//! Edits are rate-limited by a minimum interval; the last fragment is always flushed.
//! The placeholder only ever shows the first message-sized part; the rest is sent as new
//! messages when the reply is finished. Telegram's "message is not modified" answer is
//! treated as success.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, error};

use super::split::{split_message, TELEGRAM_MESSAGE_LIMIT};
use crate::core::{Bot, Chat};
use ira_client::StreamChunk;

/// True when Telegram returns "message is not modified" (content unchanged); treat as success.
pub fn is_message_not_modified_error(error: &str) -> bool {
    error.contains("message is not modified") || error.contains("exactly the same")
}

struct EditState {
    content: String,
    /// Text the placeholder currently shows.
    shown: String,
    last_edit: Option<Instant>,
}

/// Shared, cloneable handle on one placeholder message being filled in.
#[derive(Clone)]
pub struct StreamEditor {
    bot: Arc<dyn Bot>,
    chat: Chat,
    message_id: String,
    min_interval: Duration,
    state: Arc<Mutex<EditState>>,
}

impl StreamEditor {
    pub fn new(bot: Arc<dyn Bot>, chat: Chat, message_id: String, edit_interval_secs: u64) -> Self {
        Self {
            bot,
            chat,
            message_id,
            min_interval: Duration::from_secs(edit_interval_secs),
            state: Arc::new(Mutex::new(EditState {
                content: String::new(),
                shown: String::new(),
                last_edit: None,
            })),
        }
    }

    /// Appends the fragment; edits the message when the interval has passed or the fragment is the last.
    pub async fn push(&self, chunk: StreamChunk) {
        let mut state = self.state.lock().await;
        state.content.push_str(&chunk.content);

        let due = match state.last_edit {
            None => true,
            Some(prev) => prev.elapsed() >= self.min_interval,
        };
        if !(due || chunk.done) {
            debug!(len = state.content.len(), "Edit deferred");
            return;
        }
        let preview = first_part(&state.content);
        if preview.trim().is_empty() || preview == state.shown {
            return;
        }
        self.edit(&preview).await;
        state.shown = preview;
        state.last_edit = Some(Instant::now());
    }

    /// Shows the final text: the first part in the placeholder, any overflow as new messages.
    pub async fn finish(&self, text: &str) {
        let mut state = self.state.lock().await;
        state.content = text.to_string();

        let mut parts = split_message(text, TELEGRAM_MESSAGE_LIMIT).into_iter();
        let first = parts.next().unwrap_or_default();
        if first != state.shown {
            self.edit(&first).await;
            state.shown = first;
            state.last_edit = Some(Instant::now());
        }
        for part in parts {
            if let Err(e) = self.bot.send_message(&self.chat, &part).await {
                error!(error = %e, "Failed to send reply continuation");
            }
        }
    }

    async fn edit(&self, text: &str) {
        if let Err(e) = self.bot.edit_message(&self.chat, &self.message_id, text).await {
            let error_str = e.to_string();
            if !is_message_not_modified_error(&error_str) {
                error!(error = %e, message_id = %self.message_id, "Failed to edit message");
            }
        }
    }
}

/// Leading part of `content` that fits in one Telegram message.
fn first_part(content: &str) -> String {
    split_message(content, TELEGRAM_MESSAGE_LIMIT)
        .into_iter()
        .next()
        .unwrap_or_default()
}
