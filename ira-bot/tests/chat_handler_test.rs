//! Integration tests for the bot's handler chain against a mock Ira endpoint.
//!
//! Uses mockito for the chat service and [`MockBot`] in place of Telegram. Covers the /start
//! greeting, relaying text, ignoring non-text and unknown commands, and streamed edits.

use std::sync::Arc;

use ira_bot::handlers::TELEGRAM_MESSAGE_LIMIT;
use ira_bot::{
    build_handler_chain, BotConfig, HandlerResponse, IraChatHandler, Handler, DEFAULT_GREETING,
};
use ira_client::IraConfig;
use tempfile::TempDir;

mod common;
use common::mock_bot::MockBot;
use common::{chat_client_for, create_non_text_message, create_test_message, mock_chat};

const REPLY_BODY: &str = r#"[
    {"role":"user","content":"hello"},
    {"role":"assistant","content":"hi"},
    {"role":"assistant","content":"there"}
]"#;

fn bot_config(use_streaming: bool) -> BotConfig {
    BotConfig {
        bot_token: "123:test".to_string(),
        telegram_api_url: None,
        log_file: "logs/test.log".to_string(),
        greeting: DEFAULT_GREETING.to_string(),
        use_streaming,
        thinking_message: "Thinking...".to_string(),
        edit_interval_secs: 0,
        ira: IraConfig::new("AIzaSy-test-api-key", "AMf-vB-test-refresh"),
    }
}

/// **Test: /start replies with the greeting addressed by first name; Ira is not called.**
#[tokio::test]
async fn test_start_command_greets_user() {
    let mut server = mockito::Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let chat = mock_chat(&mut server, 200, REPLY_BODY, 0).await;
    let bot = Arc::new(MockBot::new());

    let chain = build_handler_chain(&bot_config(false), chat_client_for(&server, &dir), bot.clone());
    let result = chain.handle(&create_test_message("/start")).await.unwrap();

    let expected = "Hello, Asha! kya chal rha hai. 🙂";
    assert_eq!(result, HandlerResponse::Reply(expected.to_string()));
    assert_eq!(bot.sent(), vec![expected]);
    chat.assert_async().await;
}

/// **Test: Other commands are dropped silently.**
#[tokio::test]
async fn test_unknown_command_is_ignored() {
    let mut server = mockito::Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let chat = mock_chat(&mut server, 200, REPLY_BODY, 0).await;
    let bot = Arc::new(MockBot::new());

    let chain = build_handler_chain(&bot_config(false), chat_client_for(&server, &dir), bot.clone());
    let result = chain.handle(&create_test_message("/help@ira_bot")).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    assert!(bot.sent().is_empty());
    chat.assert_async().await;
}

/// **Test: Text is relayed and Ira's reply is sent back to the chat.**
#[tokio::test]
async fn test_text_is_relayed() {
    let mut server = mockito::Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let chat = mock_chat(&mut server, 200, REPLY_BODY, 1).await;
    let bot = Arc::new(MockBot::new());

    let chain = build_handler_chain(&bot_config(false), chat_client_for(&server, &dir), bot.clone());
    let result = chain.handle(&create_test_message("  hello  ")).await.unwrap();

    assert_eq!(result, HandlerResponse::Reply("hi there".to_string()));
    assert_eq!(bot.sent(), vec!["hi there"]);
    chat.assert_async().await;
}

/// **Test: Non-text updates are logged and ignored; nothing is sent.**
#[tokio::test]
async fn test_non_text_message_is_ignored() {
    let mut server = mockito::Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let chat = mock_chat(&mut server, 200, REPLY_BODY, 0).await;
    let bot = Arc::new(MockBot::new());

    let chain = build_handler_chain(&bot_config(false), chat_client_for(&server, &dir), bot.clone());
    let result = chain.handle(&create_non_text_message()).await.unwrap();

    assert_eq!(result, HandlerResponse::Continue);
    assert!(bot.sent().is_empty());
    chat.assert_async().await;
}

/// **Test: A chat-service failure reaches the user as readable text.**
#[tokio::test]
async fn test_upstream_error_is_sent_as_text() {
    let mut server = mockito::Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let _chat = mock_chat(&mut server, 500, "internal error", 1).await;
    let bot = Arc::new(MockBot::new());

    let chain = build_handler_chain(&bot_config(false), chat_client_for(&server, &dir), bot.clone());
    chain.handle(&create_test_message("hello")).await.unwrap();

    assert_eq!(bot.sent(), vec!["Error 500: internal error"]);
}

/// **Test: An empty reply still answers the user.**
#[tokio::test]
async fn test_empty_reply_sends_placeholder_text() {
    let mut server = mockito::Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let _chat = mock_chat(&mut server, 200, r#"[{"role":"user","content":"hello"}]"#, 1).await;
    let bot = Arc::new(MockBot::new());

    let chain = build_handler_chain(&bot_config(false), chat_client_for(&server, &dir), bot.clone());
    chain.handle(&create_test_message("hello")).await.unwrap();

    assert_eq!(bot.sent(), vec![ira_bot::handlers::EMPTY_REPLY_TEXT]);
}

/// **Test: Streaming sends the placeholder, then edits it with the growing reply.**
///
/// **Setup:** edit interval 0, so every fragment is flushed.
/// **Expected:** placeholder sent once; edits "hi" then "hi there"; no duplicate final edit.
#[tokio::test]
async fn test_streaming_edits_placeholder() {
    let mut server = mockito::Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let _chat = mock_chat(&mut server, 200, REPLY_BODY, 1).await;
    let bot = Arc::new(MockBot::new());

    let chain = build_handler_chain(&bot_config(true), chat_client_for(&server, &dir), bot.clone());
    let result = chain.handle(&create_test_message("hello")).await.unwrap();

    assert_eq!(result, HandlerResponse::Reply("hi there".to_string()));
    assert_eq!(bot.sent(), vec!["Thinking..."]);
    let edits: Vec<String> = bot.edits().into_iter().map(|e| e.text).collect();
    assert_eq!(edits, vec!["hi", "hi there"]);
    assert!(bot.edits().iter().all(|e| e.message_id == "1" && e.chat_id == 456));
}

/// **Test: With a long edit interval, middle fragments are batched but the last is always flushed.**
#[tokio::test]
async fn test_streaming_rate_limits_edits() {
    let mut server = mockito::Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let body = r#"[
        {"role":"assistant","content":"a"},
        {"role":"assistant","content":"b"},
        {"role":"assistant","content":"c"}
    ]"#;
    let _chat = mock_chat(&mut server, 200, body, 1).await;
    let bot = Arc::new(MockBot::new());

    let handler = IraChatHandler::new(chat_client_for(&server, &dir), bot.clone())
        .with_streaming("Thinking...", 60);
    let result = handler.handle(&create_test_message("hello")).await.unwrap();

    assert_eq!(result, HandlerResponse::Reply("a b c".to_string()));
    let edits: Vec<String> = bot.edits().into_iter().map(|e| e.text).collect();
    assert_eq!(edits, vec!["a", "a b c"]);
}

/// **Test: Streaming failure replaces the placeholder with the error text.**
#[tokio::test]
async fn test_streaming_error_edits_placeholder() {
    let mut server = mockito::Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let _chat = mock_chat(&mut server, 500, "internal error", 1).await;
    let bot = Arc::new(MockBot::new());

    let handler = IraChatHandler::new(chat_client_for(&server, &dir), bot.clone())
        .with_streaming("Thinking...", 0);
    let result = handler.handle(&create_test_message("hello")).await.unwrap();

    assert_eq!(
        result,
        HandlerResponse::Reply("Error 500: internal error".to_string())
    );
    let edits: Vec<String> = bot.edits().into_iter().map(|e| e.text).collect();
    assert_eq!(edits, vec!["Error 500: internal error"]);
}

/// **Test: "message is not modified" from Telegram does not fail the handler.**
#[tokio::test]
async fn test_not_modified_edit_is_tolerated() {
    let mut server = mockito::Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let _chat = mock_chat(&mut server, 200, REPLY_BODY, 1).await;
    let bot = Arc::new(MockBot::failing_edits(
        "Bad Request: message is not modified",
    ));

    let handler = IraChatHandler::new(chat_client_for(&server, &dir), bot.clone())
        .with_streaming("Thinking...", 0);
    let result = handler.handle(&create_test_message("hello")).await.unwrap();

    assert_eq!(result, HandlerResponse::Reply("hi there".to_string()));
}

/// Body with one assistant message of 1000 words (4999 chars), past Telegram's limit.
fn long_reply() -> (String, String) {
    let text = vec!["word"; 1000].join(" ");
    let body = format!(r#"[{{"role":"assistant","content":"{}"}}]"#, text);
    (text, body)
}

/// **Test: A reply over Telegram's limit is sent as several messages, each within the limit.**
#[tokio::test]
async fn test_long_reply_is_split() {
    let mut server = mockito::Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let (text, body) = long_reply();
    let _chat = mock_chat(&mut server, 200, &body, 1).await;
    let bot = Arc::new(MockBot::new());

    let chain = build_handler_chain(&bot_config(false), chat_client_for(&server, &dir), bot.clone());
    let result = chain.handle(&create_test_message("hello")).await.unwrap();

    assert_eq!(result, HandlerResponse::Reply(text.clone()));
    let sent = bot.sent();
    assert_eq!(sent.len(), 2);
    assert!(sent.iter().all(|p| p.chars().count() <= TELEGRAM_MESSAGE_LIMIT));
    assert_eq!(sent.join(" "), text);
}

/// **Test: Streaming keeps the placeholder within the limit and sends the overflow separately.**
#[tokio::test]
async fn test_long_streamed_reply_overflows_into_new_message() {
    let mut server = mockito::Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let (text, body) = long_reply();
    let _chat = mock_chat(&mut server, 200, &body, 1).await;
    let bot = Arc::new(MockBot::new());

    let handler = IraChatHandler::new(chat_client_for(&server, &dir), bot.clone())
        .with_streaming("Thinking...", 0);
    handler.handle(&create_test_message("hello")).await.unwrap();

    let edits = bot.edits();
    assert!(edits
        .iter()
        .all(|e| e.text.chars().count() <= TELEGRAM_MESSAGE_LIMIT));
    let sent = bot.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0], "Thinking...");
    let shown = &edits.last().unwrap().text;
    assert_eq!(format!("{} {}", shown, sent[1]), text);
}
