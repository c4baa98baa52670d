//! Chat session logic and port trait definitions for Folio.
//!
//! This crate defines the "ports" (`ChatEndpoint`, `SessionStore`) that the
//! infrastructure layer implements, plus the `ChatSession` state machine
//! that drives them. It depends only on `folio-types` -- never on
//! `folio-infra` or any HTTP/database crate.

pub mod chat;
pub mod event;
pub mod storage;
