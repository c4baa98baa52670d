//! Chat session state and the remote endpoint abstraction.
//!
//! `ChatSession` owns the message log, the single-flight busy flag and the
//! last error; `ChatEndpoint` is the port it sends user turns through.

pub mod endpoint;
pub mod session;
