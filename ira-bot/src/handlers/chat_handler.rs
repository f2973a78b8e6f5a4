//! Relays text messages to Ira and sends the reply back to the chat.
//!
//! Without streaming the reply is sent once it is complete, split to Telegram's message limit.
//! With streaming a placeholder is sent first and edited as fragments arrive; overflow past the
//! limit follows as extra messages. Chat-service failures are shown to the user as text.

use async_trait::async_trait;
use ira_client::{ChatClient, StreamChunk};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use super::split::{split_message, TELEGRAM_MESSAGE_LIMIT};
use super::stream_edit::StreamEditor;
use crate::core::{Bot, Handler, HandlerResponse, Message, Result};

/// Sent when Ira answers with no text at all.
pub const EMPTY_REPLY_TEXT: &str = "...";

#[derive(Clone)]
pub struct IraChatHandler {
    client: Arc<ChatClient>,
    bot: Arc<dyn Bot>,
    use_streaming: bool,
    thinking_message: String,
    edit_interval_secs: u64,
}

impl IraChatHandler {
    pub fn new(client: Arc<ChatClient>, bot: Arc<dyn Bot>) -> Self {
        Self {
            client,
            bot,
            use_streaming: false,
            thinking_message: "Thinking...".to_string(),
            edit_interval_secs: 1,
        }
    }

    pub fn with_streaming(
        mut self,
        thinking_message: impl Into<String>,
        edit_interval_secs: u64,
    ) -> Self {
        self.use_streaming = true;
        self.thinking_message = thinking_message.into();
        self.edit_interval_secs = edit_interval_secs;
        self
    }

    async fn process_normal(&self, message: &Message, query: &str) -> Result<HandlerResponse> {
        let reply = self.client.reply_text(query).await;
        let reply = if reply.trim().is_empty() {
            warn!(user_id = message.user.id, "Empty reply from Ira");
            EMPTY_REPLY_TEXT.to_string()
        } else {
            reply
        };
        for part in split_message(&reply, TELEGRAM_MESSAGE_LIMIT) {
            self.bot.reply_to(message, &part).await?;
        }
        Ok(HandlerResponse::Reply(reply))
    }

    async fn process_streaming(&self, message: &Message, query: &str) -> Result<HandlerResponse> {
        let message_id = match self
            .bot
            .send_message_and_return_id(&message.chat, &self.thinking_message)
            .await
        {
            Ok(id) => id,
            Err(e) => {
                error!(error = %e, "Failed to send thinking message; replying without streaming");
                return self.process_normal(message, query).await;
            }
        };

        let editor = StreamEditor::new(
            self.bot.clone(),
            message.chat.clone(),
            message_id,
            self.edit_interval_secs,
        );
        let sink = editor.clone();
        let result = self
            .client
            .send_stream(query, move |chunk: StreamChunk| {
                let sink = sink.clone();
                async move {
                    sink.push(chunk).await;
                    Ok(())
                }
            })
            .await;

        let reply = match result {
            Ok(reply) if reply.trim().is_empty() => {
                warn!(user_id = message.user.id, "Empty reply from Ira");
                EMPTY_REPLY_TEXT.to_string()
            }
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "Chat request failed");
                e.to_string()
            }
        };
        editor.finish(&reply).await;
        Ok(HandlerResponse::Reply(reply))
    }
}

#[async_trait]
impl Handler for IraChatHandler {
    fn name(&self) -> &'static str {
        "ira_chat"
    }

    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if !message.is_text() {
            info!(
                user_id = message.user.id,
                kind = ?message.kind,
                "Non-text message received, ignored"
            );
            return Ok(HandlerResponse::Ignore);
        }
        if message.command().is_some() {
            return Ok(HandlerResponse::Ignore);
        }

        let query = message.content.trim();
        info!(
            user_id = message.user.id,
            streaming = self.use_streaming,
            "step: IraChatHandler relaying message"
        );
        if self.use_streaming {
            self.process_streaming(message, query).await
        } else {
            self.process_normal(message, query).await
        }
    }
}
