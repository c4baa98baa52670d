//! Session identity and snapshot types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;

use crate::message::Message;

/// Store key under which the current session identifier is persisted.
pub const SESSION_KEY: &str = "portfolio_session_id";

/// Opaque identifier correlating a sequence of chat turns on the server.
///
/// Values read back from a session store are not required to be UUIDs,
/// but are never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap a stored value. Returns `None` for empty or whitespace-only input.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First eight characters, for banners and log lines.
    pub fn short(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.0.len());
        &self.0[..end]
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Point-in-time copy of a chat session's observable state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub messages: Vec<Message>,
    pub busy: bool,
    pub last_error: Option<String>,
}

impl SessionSnapshot {
    /// The most recently appended message. A session log is never empty.
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_non_empty_and_unique() {
        let a = SessionId::generate();
        let b = SessionId::generate();
        assert!(!a.as_str().is_empty());
        assert_ne!(a, b);
    }

    #[test]
    fn test_generate_yields_random_uuid() {
        let id = SessionId::generate();
        let parsed = Uuid::parse_str(id.as_str()).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert!(SessionId::parse("").is_none());
        assert!(SessionId::parse("   \n").is_none());
        assert_eq!(SessionId::parse(" abc ").unwrap().as_str(), "abc");
    }

    #[test]
    fn test_short_handles_short_ids() {
        assert_eq!(SessionId::parse("abc").unwrap().short(), "abc");
        assert_eq!(SessionId::parse("0123456789").unwrap().short(), "01234567");
    }

    #[test]
    fn test_session_id_serializes_as_plain_string() {
        let id = SessionId::parse("s-1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"s-1\"");
    }
}
