//! Adapters from Telegram (teloxide) types to core types.

use crate::core::{Chat, ChatKind, Message, MessageDirection, MessageKind, ToCoreMessage, User};

impl From<&teloxide::types::User> for User {
    fn from(user: &teloxide::types::User) -> Self {
        User {
            id: user.id.0 as i64,
            username: user.username.clone(),
            first_name: Some(user.first_name.clone()),
            last_name: user.last_name.clone(),
        }
    }
}

fn chat_kind(chat: &teloxide::types::Chat) -> ChatKind {
    if chat.is_private() {
        ChatKind::Private
    } else if chat.is_supergroup() {
        ChatKind::Supergroup
    } else if chat.is_group() {
        ChatKind::Group
    } else {
        ChatKind::Channel
    }
}

/// Wraps a teloxide Message for conversion to core [`Message`].
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        let (content, kind) = match self.0.text() {
            Some(text) => (text.to_string(), MessageKind::Text),
            None => (String::new(), MessageKind::Other),
        };
        Message {
            id: self.0.id.to_string(),
            user: self.0.from.as_ref().map(User::from).unwrap_or_else(User::anonymous),
            chat: Chat {
                id: self.0.chat.id.0,
                kind: chat_kind(&self.0.chat),
            },
            content,
            kind,
            direction: MessageDirection::Incoming,
            created_at: self.0.date,
        }
    }
}
