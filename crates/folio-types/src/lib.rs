//! Shared domain types for Folio.
//!
//! This crate contains the types used across the Folio chat client:
//! messages, session snapshots and events, the chat endpoint wire format,
//! client configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod error;
pub mod event;
pub mod message;
pub mod session;
pub mod wire;
