//! Bot configuration: Telegram connection, logging, reply behaviour, and the chat-service config.
//! Loaded from env (call `dotenvy::dotenv()` first).

use anyhow::{Context, Result};
use ira_client::IraConfig;
use std::env;

pub const DEFAULT_GREETING: &str = "Hello, {name}! kya chal rha hai. 🙂";

#[derive(Debug, Clone)]
pub struct BotConfig {
    /// BOT_TOKEN
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// LOG_FILE
    pub log_file: String,
    /// /start reply; `{name}` is replaced with the user's first name.
    pub greeting: String,
    /// Send a placeholder and edit it as reply fragments arrive.
    pub use_streaming: bool,
    pub thinking_message: String,
    /// Min interval (sec) between message edits when streaming; limits Telegram API rate.
    pub edit_interval_secs: u64,
    pub ira: IraConfig,
}

impl BotConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN").context("BOT_TOKEN not set")?,
        };
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/ira-bot.log".to_string());
        let greeting = env::var("IRA_GREETING")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GREETING.to_string());
        let use_streaming = env::var("USE_STREAMING")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(false);
        let thinking_message =
            env::var("THINKING_MESSAGE").unwrap_or_else(|_| "Thinking...".to_string());
        let edit_interval_secs = env::var("TELEGRAM_EDIT_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1);
        let ira = IraConfig::from_env()?;

        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
            greeting,
            use_streaming,
            thinking_message,
            edit_interval_secs,
            ira,
        })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            anyhow::bail!("BOT_TOKEN is empty");
        }
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        self.ira.validate()?;
        Ok(())
    }
}
