//! Chat message types.
//!
//! A `Message` is immutable once created. The position of a message in the
//! session log is authoritative for ordering; `timestamp` is informational.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Role of a message in a portfolio chat conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// Unique identifier for a message, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single entry in a chat session's message log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Generated locally (greeting or error notice), never returned by the endpoint.
    #[serde(default)]
    pub synthetic: bool,
}

impl Message {
    fn build(role: MessageRole, content: String, synthetic: bool) -> Self {
        Self {
            id: MessageId::new(),
            role,
            content,
            timestamp: Utc::now(),
            synthetic,
        }
    }

    /// A message typed by the user. Callers trim and reject empty input first.
    pub fn user(content: impl Into<String>) -> Self {
        Self::build(MessageRole::User, content.into(), false)
    }

    /// A reply returned by the chat endpoint.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::build(MessageRole::Assistant, content.into(), false)
    }

    /// The seeded assistant greeting at the top of every session log.
    pub fn greeting(content: impl Into<String>) -> Self {
        Self::build(MessageRole::Assistant, content.into(), true)
    }

    /// An assistant entry that surfaces a failed request inside the log.
    pub fn error_notice(error_text: &str) -> Self {
        Self::build(
            MessageRole::Assistant,
            format!("\u{26a0}\u{fe0f} {error_text}. Please check the API configuration."),
            true,
        )
    }

    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }
}
