//! Legacy protocol: `firebaseId` + fixed numeric `chemistryId`, every returned message is the reply.

use async_trait::async_trait;
use serde::Serialize;
use tracing::instrument;

use super::{post_chat, ChatBackend};
use crate::config::Protocol;
use crate::credential::Credential;
use crate::error::Result;
use crate::message::{ChatMessage, ReplyMessage};

#[derive(Clone)]
pub struct LegacyBackend {
    client: reqwest::Client,
    url: String,
    chemistry_id: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LegacyRequest<'a> {
    firebase_id: &'a str,
    messages: Vec<LegacyMessage>,
    chemistry_id: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LegacyMessage {
    #[serde(flatten)]
    base: ChatMessage,
    reactions: Reactions,
    show_reactions: bool,
}

#[derive(Serialize)]
struct Reactions {
    like: bool,
    love: bool,
    haha: bool,
}

impl LegacyBackend {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            chemistry_id: 1,
        }
    }

    pub fn with_chemistry_id(mut self, chemistry_id: u64) -> Self {
        self.chemistry_id = chemistry_id;
        self
    }
}

#[async_trait]
impl ChatBackend for LegacyBackend {
    fn protocol(&self) -> Protocol {
        Protocol::Legacy
    }

    #[instrument(skip_all, fields(url = %self.url, chemistry_id = self.chemistry_id))]
    async fn send_message(
        &self,
        credential: &Credential,
        message: ChatMessage,
    ) -> Result<Vec<ReplyMessage>> {
        let payload = LegacyRequest {
            firebase_id: &credential.user_id,
            messages: vec![LegacyMessage {
                base: message,
                reactions: Reactions {
                    like: true,
                    love: true,
                    haha: true,
                },
                show_reactions: true,
            }],
            chemistry_id: self.chemistry_id,
        };
        post_chat(&self.client, &self.url, &credential.access_token, &payload).await
    }
}
