//! Terminal chat: reads lines from stdin and prints Ira's replies.

use anyhow::Result;
use ira_client::{ChatClient, IraError};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};

const PROMPT: &str = "You: ";
const REPLY_PREFIX: &str = "IraAI: ";

/// Runs the terminal chat on stdin/stdout until EOF or `exit`.
pub async fn run_chat(client: &ChatClient, stream: bool) -> Result<()> {
    let input = BufReader::new(tokio::io::stdin());
    let mut out = std::io::stdout();
    run_chat_with(client, stream, input, &mut out).await
}

/// Chat loop over any line source and writer. Blank lines are skipped.
/// With `stream`, fragments are written as they arrive.
pub async fn run_chat_with<R, W>(
    client: &ChatClient,
    stream: bool,
    input: R,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write + Send,
{
    info!(protocol = ?client.protocol(), stream, "Terminal chat started");
    let mut lines = input.lines();
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;
        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if matches!(query, "exit" | "quit") {
            break;
        }

        if stream {
            write!(out, "{}", REPLY_PREFIX)?;
            out.flush()?;
            let result = client
                .send_stream(query, |chunk| {
                    let written = write!(out, "{}", chunk.content).and_then(|_| out.flush());
                    async move { written.map_err(IraError::from) }
                })
                .await;
            match result {
                Ok(_) => writeln!(out)?,
                Err(e) => {
                    warn!(error = %e, "Chat request failed");
                    writeln!(out, "{}", e)?;
                }
            }
        } else {
            let reply = client.reply_text(query).await;
            writeln!(out, "{}{}", REPLY_PREFIX, reply)?;
        }
    }
    info!("Terminal chat ended");
    Ok(())
}
