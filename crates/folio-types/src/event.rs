//! Change events published by a chat session.
//!
//! Front ends subscribe to these instead of polling the session. All
//! variants are Clone + Send + Sync for use with tokio broadcast channels.

use serde::{Deserialize, Serialize};

use crate::message::Message;
use crate::session::SessionId;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A message was appended to the log.
    MessageAppended { message: Message },

    /// The single-flight busy flag flipped.
    BusyChanged { busy: bool },

    /// `last_error` was set or cleared.
    ErrorChanged { error: Option<String> },

    /// The session was reset and now uses a new identifier.
    Reset { session_id: SessionId },

    /// A reply arrived for a session generation that has since been reset.
    StaleReplyDropped { session_id: SessionId },
}
