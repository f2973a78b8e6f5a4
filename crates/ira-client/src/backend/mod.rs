//! Chat backends: one implementation per wire-protocol variant of the chat service.
//!
//! A [`ChatBackend`] turns one outgoing [`ChatMessage`] into the reply records that count as the
//! answer for that variant. Status mapping is shared: 200 → parsed replies, 403 → `TokenExpired`,
//! anything else → `Upstream`.

mod data_v3;
mod legacy;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, ORIGIN, REFERER};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::{IraConfig, Protocol};
use crate::credential::Credential;
use crate::error::{IraError, Result};
use crate::http;
use crate::message::{parse_replies, ChatMessage, ReplyMessage};

pub use data_v3::DataV3Backend;
pub use legacy::LegacyBackend;

/// Sends one user message to the chat service.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    fn protocol(&self) -> Protocol;

    /// Returns the reply records that make up the answer, in arrival order.
    async fn send_message(
        &self,
        credential: &Credential,
        message: ChatMessage,
    ) -> Result<Vec<ReplyMessage>>;
}

/// Builds the backend matching `config.protocol`.
pub fn from_config(client: reqwest::Client, config: &IraConfig) -> Arc<dyn ChatBackend> {
    match config.protocol {
        Protocol::Legacy => Arc::new(
            LegacyBackend::new(client, config.chat_url.clone())
                .with_chemistry_id(config.chemistry_id),
        ),
        Protocol::DataV3 => Arc::new(DataV3Backend::new(client, config.chat_url.clone())),
    }
}

/// POSTs `payload` with the bearer token and maps the response status.
pub(crate) async fn post_chat<T: Serialize + ?Sized>(
    client: &reqwest::Client,
    url: &str,
    access_token: &str,
    payload: &T,
) -> Result<Vec<ReplyMessage>> {
    let response = client
        .post(url)
        .bearer_auth(access_token)
        .header(ACCEPT, "application/json, text/plain, */*")
        .header(ORIGIN, http::ORIGIN)
        .header(REFERER, http::REFERER)
        .json(payload)
        .send()
        .await
        .map_err(IraError::Network)?;

    let status = response.status().as_u16();
    let body = response.text().await.map_err(IraError::Network)?;
    debug!(status, body_len = body.len(), "Chat response received");

    match status {
        200 => parse_replies(&body),
        403 => Err(IraError::TokenExpired),
        status => {
            warn!(status, "Chat endpoint returned unexpected status");
            Err(IraError::Upstream { status, body })
        }
    }
}
