//! ira-bot binary: Telegram relay, terminal chat, and manual token refresh.

use anyhow::Result;
use clap::Parser;
use ira_bot::{init_file_tracing, load_config, prepare_client, run_bot, run_chat, Cli, Commands};
use ira_client::{mask_token, ChatClient, IraConfig};
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            run_bot(config).await
        }
        Commands::Chat { no_stream } => {
            init_file_tracing(&log_file())?;
            let config = IraConfig::from_env()?;
            let client = prepare_client(&config).await?;
            run_chat(&client, !no_stream).await
        }
        Commands::Refresh => {
            init_file_tracing(&log_file())?;
            let config = IraConfig::from_env()?;
            let client = ChatClient::from_config(&config)?;
            let credential = client.credentials().refresh().await?;
            println!(
                "Saved {} (user {}, token {})",
                client.credentials().path().display(),
                credential.user_id,
                mask_token(&credential.access_token)
            );
            Ok(())
        }
    }
}

fn log_file() -> String {
    env::var("LOG_FILE").unwrap_or_else(|_| "logs/ira-bot.log".to_string())
}
