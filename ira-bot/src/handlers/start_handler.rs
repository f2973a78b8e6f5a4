//! Bot commands: `/start` gets the greeting, any other command is dropped.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::core::{Bot, Handler, HandlerResponse, Message, Result};

pub struct StartHandler {
    bot: Arc<dyn Bot>,
    /// `{name}` is replaced with the sender's display name.
    greeting: String,
}

impl StartHandler {
    pub fn new(bot: Arc<dyn Bot>, greeting: impl Into<String>) -> Self {
        Self {
            bot,
            greeting: greeting.into(),
        }
    }

    pub fn greeting_for(&self, message: &Message) -> String {
        self.greeting.replace("{name}", message.user.display_name())
    }
}

#[async_trait]
impl Handler for StartHandler {
    fn name(&self) -> &'static str {
        "start"
    }

    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        match message.command() {
            Some("start") => {
                let text = self.greeting_for(message);
                self.bot.reply_to(message, &text).await?;
                Ok(HandlerResponse::Reply(text))
            }
            Some(other) => {
                info!(command = %other, user_id = message.user.id, "Unknown command ignored");
                Ok(HandlerResponse::Stop)
            }
            None => Ok(HandlerResponse::Continue),
        }
    }
}
