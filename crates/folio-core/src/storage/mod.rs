//! Session-id persistence abstractions.
//!
//! Defines the `SessionStore` trait and a process-local implementation.
//! Durable implementations live in folio-infra.

pub mod memory;
pub mod session_store;
