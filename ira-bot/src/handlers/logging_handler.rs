//! Logs each incoming message and the reply sent for it.

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::core::{Handler, HandlerResponse, Message, Result};

/// Logs the message in before() and the reply in after(); always continues.
pub struct LoggingHandler;

#[async_trait]
impl Handler for LoggingHandler {
    fn name(&self) -> &'static str {
        "logging"
    }

    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        if message.is_text() {
            info!(
                user_id = message.user.id,
                username = %message.user.username.as_deref().unwrap_or("unknown"),
                message_content = %message.content,
                "Received message"
            );
        } else {
            info!(
                user_id = message.user.id,
                kind = ?message.kind,
                "Received non-text message"
            );
        }
        Ok(true)
    }

    #[instrument(skip(self, message, response))]
    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        match response.reply_text() {
            Some(text) => info!(
                user_id = message.user.id,
                username = %message.user.username.as_deref().unwrap_or("unknown"),
                reply = %text,
                "Ira replied"
            ),
            None => debug!(message_id = %message.id, response = ?response, "Processed message"),
        }
        Ok(())
    }
}
