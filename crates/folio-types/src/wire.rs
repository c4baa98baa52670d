//! JSON bodies exchanged with the portfolio chat endpoint.
//!
//! These mirror the HTTP API exactly: `POST /api/chat`,
//! `GET /api/chat/history/{session_id}` and `GET /api/health`.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub message: String,
}

/// Successful (2xx) body of `POST /api/chat`.
///
/// The server also echoes `session_id`; unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

/// Optional body of a non-2xx response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

/// One stored turn returned by the history endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: String,
    pub content: String,
    /// Server-side timestamp, passed through as text.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body of `GET /api/chat/history/{session_id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub messages: Vec<HistoryEntry>,
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy") || self.status.eq_ignore_ascii_case("ok")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_field_names() {
        let req = ChatRequest {
            session_id: "s1".to_string(),
            message: "hello".to_string(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["session_id"], "s1");
        assert_eq!(value["message"], "hello");
    }

    #[test]
    fn test_chat_reply_ignores_echoed_session_id() {
        let reply: ChatReply =
            serde_json::from_str(r#"{"response":"React, Python...","session_id":"s1"}"#).unwrap();
        assert_eq!(reply.response, "React, Python...");
    }

    #[test]
    fn test_chat_reply_requires_response() {
        assert!(serde_json::from_str::<ChatReply>(r#"{"answer":"x"}"#).is_err());
    }

    #[test]
    fn test_error_body_detail_optional() {
        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert!(body.detail.is_none());
        let body: ErrorBody = serde_json::from_str(r#"{"detail":"rate limited"}"#).unwrap();
        assert_eq!(body.detail.as_deref(), Some("rate limited"));
    }

    #[test]
    fn test_history_response_parses_server_rows() {
        let json = r#"{"messages":[
            {"role":"user","content":"hi","created_at":"2024-05-01 10:00:00"},
            {"role":"assistant","content":"hello"}
        ]}"#;
        let history: HistoryResponse = serde_json::from_str(json).unwrap();
        assert_eq!(history.messages.len(), 2);
        assert_eq!(history.messages[0].role, "user");
        assert!(history.messages[1].created_at.is_none());
    }

    #[test]
    fn test_health_status() {
        let health: HealthStatus =
            serde_json::from_str(r#"{"status":"healthy","timestamp":"2024-05-01T10:00:00"}"#)
                .unwrap();
        assert!(health.is_healthy());
        let down = HealthStatus {
            status: "degraded".to_string(),
            timestamp: None,
        };
        assert!(!down.is_healthy());
    }
}
