//! Infrastructure layer for Folio.
//!
//! Contains implementations of the port traits defined in `folio-core`:
//! the reqwest-based chat endpoint client, JSON-file and SQLite session
//! stores, plus config loading and data-directory resolution.

pub mod config;
pub mod http;
pub mod paths;
pub mod store;
