//! Shared helpers for ira-bot integration tests.

#![allow(dead_code)]

pub mod mock_bot;

use chrono::Utc;
use ira_bot::{Chat, Message, MessageDirection, MessageKind, User};
use ira_client::{ChatClient, IraConfig, Protocol};
use std::sync::Arc;
use tempfile::TempDir;

pub const CHAT_PATH: &str = "/api/v3/data/messages";
pub const TOKEN_PATH: &str = "/v1/token";

pub fn create_test_message(content: &str) -> Message {
    Message {
        id: "test_message_id".to_string(),
        content: content.to_string(),
        user: User {
            id: 123,
            username: Some("test_user".to_string()),
            first_name: Some("Asha".to_string()),
            last_name: None,
        },
        chat: Chat::private(456),
        kind: MessageKind::Text,
        direction: MessageDirection::Incoming,
        created_at: Utc::now(),
    }
}

/// A sticker/photo/voice update: no text content.
pub fn create_non_text_message() -> Message {
    Message {
        kind: MessageKind::Other,
        ..create_test_message("")
    }
}

/// ChatClient whose token and chat endpoints live on `server`; credentials pre-seeded in `dir`.
pub fn chat_client_for(server: &mockito::ServerGuard, dir: &TempDir) -> Arc<ChatClient> {
    let path = dir.path().join("IraAI.json");
    std::fs::write(&path, r#"{"access_token":"T","user_id":"U"}"#).unwrap();
    let config = IraConfig::new("AIzaSy-test-api-key", "AMf-vB-test-refresh")
        .with_protocol(Protocol::DataV3)
        .with_credentials_file(path)
        .with_token_url(format!("{}{}", server.url(), TOKEN_PATH))
        .with_chat_url(format!("{}{}", server.url(), CHAT_PATH));
    Arc::new(ChatClient::from_config(&config).unwrap())
}

pub async fn mock_chat(
    server: &mut mockito::ServerGuard,
    status: usize,
    body: &str,
    hits: usize,
) -> mockito::Mock {
    server
        .mock("POST", CHAT_PATH)
        .match_header("authorization", "Bearer T")
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .expect(hits)
        .create_async()
        .await
}
