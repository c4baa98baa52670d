//! HTTP adapters for the portfolio chat API.

pub mod endpoint;

pub use endpoint::HttpChatEndpoint;
