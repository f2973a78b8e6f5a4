//! REPL runner: converts teloxide messages to core::Message and passes them to the HandlerChain.

use crate::chain::HandlerChain;
use crate::core::ToCoreMessage;
use anyhow::Result;
use teloxide::prelude::*;
use tracing::{debug, error, info, instrument, warn};

use super::adapters::TelegramMessageWrapper;

/// Resolves the bot's @username (logged so the operator knows where to chat), then long-polls.
/// Each update is converted to core::Message and handled in its own task so slow chat
/// replies never block polling.
#[instrument(skip(bot, handler_chain))]
pub async fn run_repl(bot: teloxide::Bot, handler_chain: HandlerChain) -> Result<()> {
    match bot.get_me().await {
        Ok(me) => match &me.user.username {
            Some(username) => info!(username = %username, "You can chat now on @{}", username),
            None => info!("Bot identity resolved (no username)"),
        },
        Err(e) => warn!(error = %e, "getMe failed; continuing with polling"),
    }

    info!("Server is now running...");
    teloxide::repl(bot, move |msg: teloxide::types::Message| {
        let chain = handler_chain.clone();
        async move {
            let core_msg = TelegramMessageWrapper(&msg).to_core();
            debug!(
                user_id = core_msg.user.id,
                chat_id = core_msg.chat.id,
                kind = ?core_msg.kind,
                "Update converted"
            );

            tokio::spawn(async move {
                if let Err(e) = chain.handle(&core_msg).await {
                    error!(error = %e, user_id = core_msg.user.id, "Handler chain failed");
                }
            });

            respond(())
        }
    })
    .await;

    Ok(())
}
