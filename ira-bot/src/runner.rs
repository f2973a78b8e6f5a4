//! Wires the chat client, Telegram bot, and handler chain, then runs the REPL.

use anyhow::{Context, Result};
use ira_client::{mask_token, ChatClient, IraConfig};
use std::sync::Arc;
use teloxide::Bot as TeloxideBot;
use tracing::{error, info, instrument};

use crate::chain::HandlerChain;
use crate::config::BotConfig;
use crate::core::{init_tracing, Bot};
use crate::handlers::{IraChatHandler, LoggingHandler, StartHandler};
use crate::telegram::{run_repl, TelegramBotAdapter};

/// Builds the chat client and makes sure usable credentials exist before anything is served.
/// Fails when the bounded refresh cannot produce a credential.
#[instrument(skip(config))]
pub async fn prepare_client(config: &IraConfig) -> Result<Arc<ChatClient>> {
    let client = ChatClient::from_config(config)?;
    let credential = client
        .credentials()
        .initialize()
        .await
        .context("Unable to obtain Ira credentials")?;
    info!(
        user_id = %credential.user_id,
        access_token = %mask_token(&credential.access_token),
        "Credentials ready"
    );
    Ok(Arc::new(client))
}

/// teloxide Bot with the optional API URL override applied.
pub fn build_teloxide_bot(config: &BotConfig) -> TeloxideBot {
    let bot = TeloxideBot::new(config.bot_token.clone());
    match config.telegram_api_url {
        Some(ref url_str) => match reqwest::Url::parse(url_str) {
            Ok(url) => bot.set_api_url(url),
            Err(e) => {
                error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                bot
            }
        },
        None => bot,
    }
}

/// Logging → /start and commands → Ira relay.
pub fn build_handler_chain(
    config: &BotConfig,
    client: Arc<ChatClient>,
    bot: Arc<dyn Bot>,
) -> HandlerChain {
    let mut chat = IraChatHandler::new(client, bot.clone());
    if config.use_streaming {
        chat = chat.with_streaming(config.thinking_message.clone(), config.edit_interval_secs);
    }
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(StartHandler::new(bot, config.greeting.clone())))
        .add_handler(Arc::new(chat))
}

/// Main entry: validate config, init logging, authenticate, then serve Telegram updates.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(&config.log_file)?;

    info!(
        protocol = ?config.ira.protocol,
        streaming = config.use_streaming,
        "Initializing bot"
    );

    let client = prepare_client(&config.ira).await?;
    let teloxide_bot = build_teloxide_bot(&config);
    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let handler_chain = build_handler_chain(&config, client, bot);

    info!("Bot started successfully");
    run_repl(teloxide_bot, handler_chain).await
}
