//! ChatEndpoint trait definition.

use folio_types::error::ChatError;
use folio_types::wire::{ChatReply, ChatRequest};

/// The remote service that produces assistant replies.
///
/// Implementations live in folio-infra (e.g., `HttpChatEndpoint`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait ChatEndpoint: Send + Sync {
    /// Submit one user turn and wait for the reply.
    ///
    /// Exactly one request is issued per call; there are no retries.
    fn send(
        &self,
        request: &ChatRequest,
    ) -> impl std::future::Future<Output = Result<ChatReply, ChatError>> + Send;
}
