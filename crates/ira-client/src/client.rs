//! ChatClient: sends one user message and assembles the reply text.
//!
//! A 403 triggers exactly one credential refresh and one retry; a second 403 is terminal
//! (`AuthUnrecoverable`). Other failures are returned as-is and never retried here.

use chrono::Utc;
use std::future::Future;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::backend::{self, ChatBackend};
use crate::config::{IraConfig, Protocol};
use crate::error::{IraError, Result};
use crate::http::build_http_client;
use crate::issuer::SecureTokenIssuer;
use crate::message::{format_timestamp, join_replies, ChatMessage, ReplyMessage};
use crate::store::CredentialStore;

/// One fragment of the reply, emitted while the reply is assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamChunk {
    /// Text to append; includes the separating space for every fragment after the first.
    pub content: String,
    /// True on the last fragment.
    pub done: bool,
}

#[derive(Clone)]
pub struct ChatClient {
    backend: Arc<dyn ChatBackend>,
    credentials: Arc<CredentialStore>,
}

impl ChatClient {
    pub fn new(backend: Arc<dyn ChatBackend>, credentials: Arc<CredentialStore>) -> Self {
        Self {
            backend,
            credentials,
        }
    }

    /// Wires HTTP client, token issuer, credential store and the configured backend.
    pub fn from_config(config: &IraConfig) -> Result<Self> {
        config.validate()?;
        let http = build_http_client(config.timeout)?;
        let issuer = Arc::new(SecureTokenIssuer::from_config(http.clone(), config));
        let credentials = Arc::new(
            CredentialStore::new(config.credentials_file.clone(), issuer)
                .with_max_attempts(config.auth_max_attempts),
        );
        let backend = backend::from_config(http, config);
        info!(
            protocol = ?config.protocol,
            chat_url = %config.chat_url,
            credentials_file = %config.credentials_file.display(),
            "Chat client configured"
        );
        Ok(Self::new(backend, credentials))
    }

    pub fn credentials(&self) -> &Arc<CredentialStore> {
        &self.credentials
    }

    pub fn protocol(&self) -> Protocol {
        self.backend.protocol()
    }

    /// Sends `query` and returns the reply contents joined by single spaces.
    #[instrument(skip(self, query), fields(query_len = query.len()))]
    pub async fn send(&self, query: &str) -> Result<String> {
        let replies = self.exchange(query).await?;
        Ok(join_replies(&replies))
    }

    /// Like [`send`](Self::send), but also hands each fragment to `callback` as it is assembled.
    /// The concatenated fragments equal the returned string. An empty reply yields a single
    /// empty chunk with `done` set.
    #[instrument(skip(self, query, callback), fields(query_len = query.len()))]
    pub async fn send_stream<F, Fut>(&self, query: &str, mut callback: F) -> Result<String>
    where
        F: FnMut(StreamChunk) -> Fut + Send,
        Fut: Future<Output = Result<()>> + Send,
    {
        let replies = self.exchange(query).await?;
        let fragments: Vec<&str> = replies.iter().filter_map(ReplyMessage::text).collect();
        if fragments.is_empty() {
            callback(StreamChunk {
                content: String::new(),
                done: true,
            })
            .await?;
            return Ok(String::new());
        }

        let mut full_response = String::new();
        for (i, text) in fragments.iter().enumerate() {
            let content = if i == 0 {
                text.to_string()
            } else {
                format!(" {}", text)
            };
            full_response.push_str(&content);
            callback(StreamChunk {
                content,
                done: i + 1 == fragments.len(),
            })
            .await?;
        }
        Ok(full_response)
    }

    /// Reply text, or a readable description of the failure. Never fails.
    pub async fn reply_text(&self, query: &str) -> String {
        match self.send(query).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "Chat request failed");
                e.to_string()
            }
        }
    }

    async fn exchange(&self, query: &str) -> Result<Vec<ReplyMessage>> {
        let credential = self.credentials.current().await?;
        let message = ChatMessage::user(query, format_timestamp(Utc::now()));

        match self.backend.send_message(&credential, message.clone()).await {
            Err(IraError::TokenExpired) => {
                info!("Token expired. Generating a new one...");
                let fresh = self.credentials.refresh_expired(&credential).await?;
                match self.backend.send_message(&fresh, message).await {
                    Err(IraError::TokenExpired) => Err(IraError::AuthUnrecoverable {
                        attempts: 2,
                        reason: "chat service rejected the refreshed token".to_string(),
                    }),
                    other => other,
                }
            }
            other => other,
        }
    }
}
