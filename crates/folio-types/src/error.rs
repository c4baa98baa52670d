use thiserror::Error;

/// Failures talking to the remote chat endpoint.
///
/// None of these escape a chat session's `send`: they are converted into
/// `last_error` and a synthetic assistant message.
#[derive(Debug, Error)]
pub enum ChatError {
    /// No response was obtained (connection refused, DNS, TLS, timeout, ...).
    #[error("transport error: {0}")]
    Transport(String),

    /// A response arrived with a non-2xx status.
    #[error("server error {status}{}", .detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default())]
    Server { status: u16, detail: Option<String> },

    /// A 2xx response whose body was not the expected JSON shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl ChatError {
    /// Human-readable text stored as the session's `last_error`.
    ///
    /// Prefers the server's `detail`, then falls back to a message carrying
    /// the status code. Transport and decoding failures get generic text.
    pub fn user_message(&self) -> String {
        match self {
            ChatError::Server {
                detail: Some(detail),
                ..
            } if !detail.trim().is_empty() => detail.clone(),
            ChatError::Server { status, .. } => format!("Server error: {status}"),
            ChatError::Transport(_) => "Could not reach the chat service".to_string(),
            ChatError::MalformedResponse(_) => "Something went wrong".to_string(),
        }
    }
}

/// Errors from session store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(String),

    #[error("corrupt store contents: {0}")]
    Corrupt(String),

    #[error("query error: {0}")]
    Query(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_detail() {
        let err = ChatError::Server {
            status: 500,
            detail: Some("rate limited".to_string()),
        };
        assert_eq!(err.user_message(), "rate limited");
    }

    #[test]
    fn test_user_message_falls_back_to_status() {
        let err = ChatError::Server {
            status: 502,
            detail: None,
        };
        assert_eq!(err.user_message(), "Server error: 502");

        let blank = ChatError::Server {
            status: 503,
            detail: Some("  ".to_string()),
        };
        assert_eq!(blank.user_message(), "Server error: 503");
    }

    #[test]
    fn test_transport_user_message_is_generic() {
        let err = ChatError::Transport("connection refused".to_string());
        assert!(!err.user_message().is_empty());
        assert!(!err.user_message().contains("refused"));
    }

    #[test]
    fn test_server_error_display() {
        let err = ChatError::Server {
            status: 500,
            detail: Some("boom".to_string()),
        };
        assert_eq!(err.to_string(), "server error 500: boom");
        let err = ChatError::Server {
            status: 404,
            detail: None,
        };
        assert_eq!(err.to_string(), "server error 404");
    }

    #[test]
    fn test_store_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: StoreError = io.into();
        assert!(err.to_string().contains("denied"));
    }
}
