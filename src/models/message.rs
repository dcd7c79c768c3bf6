//! Conversation message types.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Author of a conversation message.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    User,
    Assistant,
}

/// A single message within a thread.
///
/// Immutable once created; ordered by insertion within its [`Thread`].
///
/// [`Thread`]: super::Thread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: Role,
    pub content: String,
    /// Creation time in milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl ConversationMessage {
    /// Create a message stamped with the current time.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: now_millis(),
        }
    }

    /// Reduce to the model-facing `{role, content}` pair.
    ///
    /// Timestamps and ids are client-side bookkeeping and never part of
    /// a request payload.
    pub fn to_chat_message(&self) -> ChatMessage {
        ChatMessage {
            role: self.role,
            content: self.content.clone(),
        }
    }
}

/// A model-facing `{role, content}` pair, as sent over the wire to the
/// proxy and the direct provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            "\"assistant\""
        );
        let back: Role = serde_json::from_str("\"assistant\"").unwrap();
        assert_eq!(back, Role::Assistant);
    }

    #[test]
    fn role_display_and_parse() {
        assert_eq!(Role::User.to_string(), "user");
        assert_eq!(Role::Assistant.to_string(), "assistant");
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert_eq!("Assistant".parse::<Role>().unwrap(), Role::Assistant);
        assert!("system".parse::<Role>().is_err());
    }

    #[test]
    fn new_message_is_timestamped() {
        let msg = ConversationMessage::new(Role::User, "hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "hello");
        assert!(msg.timestamp > 0);
    }

    #[test]
    fn to_chat_message_drops_timestamp() {
        let msg = ConversationMessage::new(Role::Assistant, "answer");
        let chat = msg.to_chat_message();
        assert_eq!(chat, ChatMessage::assistant("answer"));
        let json = serde_json::to_value(&chat).unwrap();
        assert!(json.get("timestamp").is_none());
        assert_eq!(json["role"], "assistant");
        assert_eq!(json["content"], "answer");
    }

    #[test]
    fn chat_message_constructors() {
        assert_eq!(ChatMessage::user("q").role, Role::User);
        assert_eq!(ChatMessage::assistant("a").role, Role::Assistant);
    }
}
