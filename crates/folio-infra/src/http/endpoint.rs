//! HttpChatEndpoint -- concrete [`ChatEndpoint`] over the portfolio HTTP API.
//!
//! Sends user turns to `POST /api/chat` and maps every failure onto
//! [`ChatError`]: no response at all is `Transport`, a non-2xx status is
//! `Server` (carrying the JSON `detail` when the body has one), and a 2xx
//! body without a `response` string is `MalformedResponse`. Also exposes
//! the read-only history and health endpoints of the same API.

use std::time::Duration;

use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use folio_core::chat::endpoint::ChatEndpoint;
use folio_types::error::ChatError;
use folio_types::session::SessionId;
use folio_types::wire::{
    ChatReply, ChatRequest, ErrorBody, HealthStatus, HistoryEntry, HistoryResponse,
};

/// Client for one portfolio API deployment.
#[derive(Debug, Clone)]
pub struct HttpChatEndpoint {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpChatEndpoint {
    /// Create a client for the API rooted at `base_url`.
    ///
    /// `timeout` of `None` keeps reqwest's default (no overall timeout).
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ChatError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ChatError::Transport(format!("invalid API URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ChatError::Transport(format!(
                "API URL '{base_url}' cannot carry a path"
            )));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ChatError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `{base}/{segments...}`, percent-encoding each segment.
    fn url(&self, segments: &[&str]) -> Result<Url, ChatError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ChatError::Transport("API URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Fetch the server-side transcript for a session.
    pub async fn history(&self, session_id: &SessionId) -> Result<Vec<HistoryEntry>, ChatError> {
        let url = self.url(&["api", "chat", "history", session_id.as_str()])?;
        let response = self.client.get(url).send().await.map_err(transport_error)?;
        let body: HistoryResponse = decode_success(response).await?;
        Ok(body.messages)
    }

    /// Query the API's health endpoint.
    pub async fn health(&self) -> Result<HealthStatus, ChatError> {
        let url = self.url(&["api", "health"])?;
        let response = self.client.get(url).send().await.map_err(transport_error)?;
        decode_success(response).await
    }
}

impl ChatEndpoint for HttpChatEndpoint {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, ChatError> {
        let url = self.url(&["api", "chat"])?;
        debug!(url = %url, session_id = %request.session_id, "POST chat message");

        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        decode_success(response).await
    }
}

fn transport_error(err: reqwest::Error) -> ChatError {
    warn!(error = %err, "Chat endpoint unreachable");
    ChatError::Transport(err.to_string())
}

/// Turn a response into `T` on 2xx, or into a `ChatError` otherwise.
async fn decode_success<T: DeserializeOwned>(response: Response) -> Result<T, ChatError> {
    let status = response.status();
    let body = response.bytes().await.map_err(transport_error)?;

    if !status.is_success() {
        return Err(server_error(status, &body));
    }

    serde_json::from_slice(&body)
        .map_err(|e| ChatError::MalformedResponse(format!("failed to parse response: {e}")))
}

/// Build a `Server` error, taking `detail` from the body when it parses.
fn server_error(status: StatusCode, body: &[u8]) -> ChatError {
    let detail = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .filter(|d| !d.trim().is_empty());
    warn!(status = status.as_u16(), detail = ?detail, "Chat endpoint returned an error status");
    ChatError::Server {
        status: status.as_u16(),
        detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::extract::Path;
    use axum::http::StatusCode as AxumStatus;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;

    use folio_core::chat::session::{ChatSession, SendOutcome, SessionConfig};
    use folio_core::storage::memory::MemorySessionStore;

    /// Serve `router` on an ephemeral port and return its base URL.
    async fn spawn_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// A base URL nothing is listening on.
    async fn closed_port_url() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}")
    }

    fn echo_router() -> Router {
        Router::new()
            .route(
                "/api/chat",
                post(|Json(req): Json<ChatRequest>| async move {
                    Json(json!({
                        "response": format!("echo: {}", req.message),
                        "session_id": req.session_id,
                    }))
                }),
            )
            .route(
                "/api/chat/history/{session_id}",
                get(|Path(session_id): Path<String>| async move {
                    Json(json!({"messages": [
                        {"role": "user", "content": format!("asked in {session_id}"), "created_at": "2024-05-01 10:00:00"},
                        {"role": "assistant", "content": "answered", "created_at": "2024-05-01 10:00:01"},
                    ]}))
                }),
            )
            .route(
                "/api/health",
                get(|| async { Json(json!({"status": "healthy", "timestamp": "2024-05-01T10:00:00"})) }),
            )
    }

    fn request(message: &str) -> ChatRequest {
        ChatRequest {
            session_id: "session-1".to_string(),
            message: message.to_string(),
        }
    }

    #[tokio::test]
    async fn test_send_success() {
        let base = spawn_server(echo_router()).await;
        let endpoint = HttpChatEndpoint::new(&base, None).unwrap();

        let reply = endpoint.send(&request("hello")).await.unwrap();
        assert_eq!(reply.response, "echo: hello");
    }

    #[tokio::test]
    async fn test_base_url_trailing_slash() {
        let base = spawn_server(echo_router()).await;
        let endpoint = HttpChatEndpoint::new(&format!("{base}/"), None).unwrap();

        let reply = endpoint.send(&request("hi")).await.unwrap();
        assert_eq!(reply.response, "echo: hi");
    }

    #[tokio::test]
    async fn test_server_error_with_detail() {
        let router = Router::new().route(
            "/api/chat",
            post(|| async {
                (
                    AxumStatus::INTERNAL_SERVER_ERROR,
                    Json(json!({"detail": "rate limited"})),
                )
            }),
        );
        let base = spawn_server(router).await;
        let endpoint = HttpChatEndpoint::new(&base, None).unwrap();

        let err = endpoint.send(&request("hello")).await.unwrap_err();
        match &err {
            ChatError::Server { status, detail } => {
                assert_eq!(*status, 500);
                assert_eq!(detail.as_deref(), Some("rate limited"));
            }
            other => panic!("expected server error, got {other:?}"),
        }
        assert_eq!(err.user_message(), "rate limited");
    }

    #[tokio::test]
    async fn test_server_error_with_unparseable_body() {
        let router = Router::new().route(
            "/api/chat",
            post(|| async { (AxumStatus::BAD_GATEWAY, "upstream exploded") }),
        );
        let base = spawn_server(router).await;
        let endpoint = HttpChatEndpoint::new(&base, None).unwrap();

        let err = endpoint.send(&request("hello")).await.unwrap_err();
        assert!(matches!(err, ChatError::Server { status: 502, detail: None }));
        assert_eq!(err.user_message(), "Server error: 502");
    }

    #[tokio::test]
    async fn test_not_found_route_is_server_error() {
        let base = spawn_server(Router::new()).await;
        let endpoint = HttpChatEndpoint::new(&base, None).unwrap();

        let err = endpoint.send(&request("hello")).await.unwrap_err();
        assert!(matches!(err, ChatError::Server { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_malformed_success_body() {
        let router = Router::new().route(
            "/api/chat",
            post(|| async { Json(json!({"answer": "wrong field"})) }),
        );
        let base = spawn_server(router).await;
        let endpoint = HttpChatEndpoint::new(&base, None).unwrap();

        let err = endpoint.send(&request("hello")).await.unwrap_err();
        assert!(matches!(err, ChatError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let base = closed_port_url().await;
        let endpoint = HttpChatEndpoint::new(&base, Some(Duration::from_secs(5))).unwrap();

        let err = endpoint.send(&request("hello")).await.unwrap_err();
        assert!(matches!(err, ChatError::Transport(_)));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        assert!(HttpChatEndpoint::new("not a url", None).is_err());
        assert!(HttpChatEndpoint::new("mailto:alex@example.com", None).is_err());
    }

    #[tokio::test]
    async fn test_history_and_health() {
        let base = spawn_server(echo_router()).await;
        let endpoint = HttpChatEndpoint::new(&base, None).unwrap();

        let id = SessionId::parse("abc-123").unwrap();
        let history = endpoint.history(&id).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].content, "asked in abc-123");
        assert_eq!(history[1].role, "assistant");

        let health = endpoint.health().await.unwrap();
        assert!(health.is_healthy());
    }

    #[tokio::test]
    async fn test_session_over_http_end_to_end() {
        let base = spawn_server(echo_router()).await;
        let endpoint = HttpChatEndpoint::new(&base, None).unwrap();
        let session =
            ChatSession::open(MemorySessionStore::new(), endpoint, SessionConfig::default())
                .await;

        let outcome = session.send("What's your tech stack?").await;
        assert!(matches!(outcome, SendOutcome::Replied(_)));

        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.messages.len(), 3);
        assert_eq!(snapshot.messages[2].content, "echo: What's your tech stack?");
        assert!(!snapshot.busy);
    }

    #[tokio::test]
    async fn test_session_over_unreachable_http() {
        let endpoint = HttpChatEndpoint::new(&closed_port_url().await, None).unwrap();
        let session =
            ChatSession::open(MemorySessionStore::new(), endpoint, SessionConfig::default())
                .await;

        let outcome = session.send("anyone there?").await;
        assert!(outcome.is_failure());

        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.messages.len(), 3);
        assert!(snapshot.last_error.as_deref().is_some_and(|e| !e.is_empty()));
        assert!(!snapshot.busy);
    }
}
