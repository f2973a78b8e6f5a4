//! v3 data protocol: fresh random hex `chemistry_id` per request, only `assistant` messages are the reply.

use async_trait::async_trait;
use serde::Serialize;
use tracing::instrument;

use super::{post_chat, ChatBackend};
use crate::config::Protocol;
use crate::credential::Credential;
use crate::error::Result;
use crate::message::{new_chemistry_id, ChatMessage, ReplyMessage};

#[derive(Clone)]
pub struct DataV3Backend {
    client: reqwest::Client,
    url: String,
}

#[derive(Serialize)]
struct DataV3Request {
    chemistry_id: String,
    messages: Vec<DataV3Message>,
    user_timestamp_iso: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DataV3Message {
    #[serde(flatten)]
    base: ChatMessage,
    emoji_reaction: Option<String>,
    is_cleared: bool,
    parent_message_id: Option<String>,
}

impl DataV3Request {
    fn new(chemistry_id: String, message: ChatMessage) -> Self {
        let user_timestamp_iso = message.timestamp.clone();
        Self {
            chemistry_id,
            messages: vec![DataV3Message {
                base: message,
                emoji_reaction: None,
                is_cleared: false,
                parent_message_id: None,
            }],
            user_timestamp_iso,
        }
    }
}

impl DataV3Backend {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl ChatBackend for DataV3Backend {
    fn protocol(&self) -> Protocol {
        Protocol::DataV3
    }

    #[instrument(skip_all, fields(url = %self.url))]
    async fn send_message(
        &self,
        credential: &Credential,
        message: ChatMessage,
    ) -> Result<Vec<ReplyMessage>> {
        let payload = DataV3Request::new(new_chemistry_id(), message);
        let replies = post_chat(&self.client, &self.url, &credential.access_token, &payload).await?;
        Ok(replies.into_iter().filter(ReplyMessage::is_assistant).collect())
    }
}
