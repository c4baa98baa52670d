//! Chat session state machine.
//!
//! A `ChatSession` owns an append-only message log, a single-flight busy
//! flag, the last error, and the session identifier it sends to the chat
//! endpoint. Endpoint failures never escape `send`: they become
//! `last_error` plus a synthetic assistant message in the log.
//!
//! State lives behind a mutex that is never held across an await, so a
//! concurrent `send` observes `busy` and returns at once and `reset` can run
//! while a request is in flight. Each reset bumps a generation counter; a
//! reply that comes back for an older generation is dropped instead of
//! being appended to the fresh log.
//!
//! A `send` future dropped mid-request (timeout, `select!`, task abort)
//! still settles the turn: busy is cleared and an interruption notice is
//! appended, unless a reset already moved the session on.

use std::sync::{Mutex, MutexGuard, PoisonError};

use folio_types::config::ClientConfig;
use folio_types::event::SessionEvent;
use folio_types::message::Message;
use folio_types::session::{SESSION_KEY, SessionId, SessionSnapshot};
use folio_types::wire::ChatRequest;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::chat::endpoint::ChatEndpoint;
use crate::event::bus::EventBus;
use crate::storage::session_store::SessionStore;

/// `last_error` recorded when a `send` is dropped before the endpoint answers.
pub const INTERRUPTED_ERROR: &str = "The request was interrupted before a reply arrived";

/// Texts seeded into the log and offered to the user.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub greeting: String,
    pub reset_greeting: String,
    pub suggested_questions: Vec<String>,
}

impl From<&ClientConfig> for SessionConfig {
    fn from(config: &ClientConfig) -> Self {
        Self {
            greeting: config.greeting.clone(),
            reset_greeting: config.reset_greeting.clone(),
            suggested_questions: config.suggested_questions.clone(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::from(&ClientConfig::default())
    }
}

/// Why `send` did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Input was empty after trimming.
    EmptyInput,
    /// Another request is still outstanding.
    Busy,
}

/// Result of a `send` call. Never an error: failures are part of the log.
#[derive(Debug, Clone)]
pub enum SendOutcome {
    /// No state change and no network call.
    Ignored(IgnoreReason),
    /// The endpoint replied; the assistant message was appended.
    Replied(Message),
    /// The request failed; `notice` was appended and `error` is the new `last_error`.
    Failed { error: String, notice: Message },
    /// The session was reset while the request was in flight; the outcome was discarded.
    Stale,
}

impl SendOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, SendOutcome::Failed { .. })
    }

    /// The assistant message appended for this send, if any.
    pub fn reply(&self) -> Option<&Message> {
        match self {
            SendOutcome::Replied(message) => Some(message),
            SendOutcome::Failed { notice, .. } => Some(notice),
            SendOutcome::Ignored(_) | SendOutcome::Stale => None,
        }
    }
}

struct SessionState {
    session_id: SessionId,
    messages: Vec<Message>,
    busy: bool,
    last_error: Option<String>,
    generation: u64,
}

impl SessionState {
    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.session_id.clone(),
            messages: self.messages.clone(),
            busy: self.busy,
            last_error: self.last_error.clone(),
        }
    }
}

/// One conversation with the portfolio chat endpoint.
///
/// Generic over `SessionStore` and `ChatEndpoint` so folio-core never
/// depends on folio-infra.
pub struct ChatSession<S: SessionStore, E: ChatEndpoint> {
    store: S,
    endpoint: E,
    config: SessionConfig,
    events: EventBus,
    state: Mutex<SessionState>,
}

impl<S: SessionStore, E: ChatEndpoint> ChatSession<S, E> {
    /// Construct a session, reusing the identifier held by `store` if any.
    ///
    /// When the store has no usable identifier a new one is generated and
    /// persisted. Store failures are logged; the session still opens with
    /// an in-memory identifier.
    pub async fn open(store: S, endpoint: E, config: SessionConfig) -> Self {
        let stored = match store.get(SESSION_KEY).await {
            Ok(value) => value.as_deref().and_then(SessionId::parse),
            Err(e) => {
                warn!(error = %e, "Failed to read session id, starting a new session");
                None
            }
        };

        let session_id = match stored {
            Some(id) => {
                debug!(session_id = %id, "Resuming stored session id");
                id
            }
            None => {
                let id = SessionId::generate();
                if let Err(e) = store.set(SESSION_KEY, id.as_str()).await {
                    warn!(session_id = %id, error = %e, "Failed to persist new session id");
                }
                info!(session_id = %id, "Created new session id");
                id
            }
        };

        let state = SessionState {
            session_id,
            messages: vec![Message::greeting(config.greeting.clone())],
            busy: false,
            last_error: None,
            generation: 0,
        };

        Self {
            store,
            endpoint,
            config,
            events: EventBus::default(),
            state: Mutex::new(state),
        }
    }

    /// Send one user turn.
    ///
    /// Empty/whitespace input and calls made while busy are no-ops. An
    /// accepted call appends exactly one user message and, once the
    /// endpoint answers, exactly one assistant message (reply or error
    /// notice). If the returned future is dropped before the endpoint
    /// answers, the notice is an interruption carrying [`INTERRUPTED_ERROR`].
    pub async fn send(&self, text: &str) -> SendOutcome {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return SendOutcome::Ignored(IgnoreReason::EmptyInput);
        }

        let (request, generation) = {
            let mut state = self.lock_state();
            if state.busy {
                debug!("Send ignored, a request is already in flight");
                return SendOutcome::Ignored(IgnoreReason::Busy);
            }

            let user_message = Message::user(trimmed);
            state.messages.push(user_message.clone());
            state.busy = true;
            let cleared = state.last_error.take().is_some();

            self.events.publish(SessionEvent::MessageAppended {
                message: user_message,
            });
            self.events.publish(SessionEvent::BusyChanged { busy: true });
            if cleared {
                self.events.publish(SessionEvent::ErrorChanged { error: None });
            }

            let request = ChatRequest {
                session_id: state.session_id.to_string(),
                message: trimmed.to_string(),
            };
            (request, state.generation)
        };

        let pending = PendingSend {
            session: self,
            generation,
            armed: true,
        };
        debug!(session_id = %request.session_id, "Sending chat message");
        let result = self.endpoint.send(&request).await;
        pending.disarm();

        let mut state = self.lock_state();
        if state.generation != generation {
            info!(
                session_id = %request.session_id,
                "Dropping reply for a session that was reset mid-request"
            );
            if let Some(id) = SessionId::parse(&request.session_id) {
                self.events
                    .publish(SessionEvent::StaleReplyDropped { session_id: id });
            }
            return SendOutcome::Stale;
        }

        let outcome = match result {
            Ok(reply) => {
                let message = Message::assistant(reply.response);
                state.messages.push(message.clone());
                self.events.publish(SessionEvent::MessageAppended {
                    message: message.clone(),
                });
                SendOutcome::Replied(message)
            }
            Err(err) => {
                let error = err.user_message();
                warn!(session_id = %request.session_id, error = %err, "Chat request failed");
                let notice = Message::error_notice(&error);
                state.last_error = Some(error.clone());
                state.messages.push(notice.clone());
                self.events.publish(SessionEvent::ErrorChanged {
                    error: Some(error.clone()),
                });
                self.events.publish(SessionEvent::MessageAppended {
                    message: notice.clone(),
                });
                SendOutcome::Failed { error, notice }
            }
        };

        state.busy = false;
        self.events.publish(SessionEvent::BusyChanged { busy: false });
        outcome
    }

    /// Start over with a new session identifier.
    ///
    /// The in-memory state changes before the store is touched: the log is
    /// truncated to a fresh greeting, `last_error` is cleared and `busy` is
    /// forced false. A failed store write is logged and otherwise ignored.
    pub async fn reset(&self) -> SessionSnapshot {
        let (snapshot, session_id) = {
            let mut state = self.lock_state();
            let session_id = SessionId::generate();
            let was_busy = state.busy;

            state.session_id = session_id.clone();
            state.messages = vec![Message::greeting(self.config.reset_greeting.clone())];
            state.last_error = None;
            state.busy = false;
            state.generation += 1;

            self.events.publish(SessionEvent::Reset {
                session_id: session_id.clone(),
            });
            if was_busy {
                self.events.publish(SessionEvent::BusyChanged { busy: false });
            }
            (state.snapshot(), session_id)
        };

        if let Err(e) = self.store.set(SESSION_KEY, session_id.as_str()).await {
            warn!(session_id = %session_id, error = %e, "Failed to persist reset session id");
        }
        info!(session_id = %session_id, "Session reset");
        snapshot
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.lock_state().snapshot()
    }

    pub async fn session_id(&self) -> SessionId {
        self.lock_state().session_id.clone()
    }

    pub async fn messages(&self) -> Vec<Message> {
        self.lock_state().messages.clone()
    }

    pub async fn is_busy(&self) -> bool {
        self.lock_state().busy
    }

    pub async fn last_error(&self) -> Option<String> {
        self.lock_state().last_error.clone()
    }

    /// Subscribe to change events from this session.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn suggested_questions(&self) -> &[String] {
        &self.config.suggested_questions
    }

    /// Access the session store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Access the chat endpoint.
    pub fn endpoint(&self) -> &E {
        &self.endpoint
    }
}

/// Settles an accepted turn whose `send` future is dropped mid-request.
struct PendingSend<'a, S: SessionStore, E: ChatEndpoint> {
    session: &'a ChatSession<S, E>,
    generation: u64,
    armed: bool,
}

impl<S: SessionStore, E: ChatEndpoint> PendingSend<'_, S, E> {
    /// The endpoint answered; `send` settles the turn itself.
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<S: SessionStore, E: ChatEndpoint> Drop for PendingSend<'_, S, E> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        let session = self.session;
        let mut state = session.lock_state();
        // A reset since the request went out already cleared busy.
        if state.generation != self.generation || !state.busy {
            return;
        }

        warn!(session_id = %state.session_id, "Send dropped before the endpoint answered");
        let error = INTERRUPTED_ERROR.to_string();
        let notice = Message::error_notice(&error);
        state.last_error = Some(error.clone());
        state.messages.push(notice.clone());
        state.busy = false;

        session.events.publish(SessionEvent::ErrorChanged { error: Some(error) });
        session.events.publish(SessionEvent::MessageAppended { message: notice });
        session.events.publish(SessionEvent::BusyChanged { busy: false });
    }
}
