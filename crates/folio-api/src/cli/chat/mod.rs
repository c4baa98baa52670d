//! Interactive terminal chat with the portfolio assistant.
//!
//! Mirrors the web widget: a welcome banner, the greeting, starter
//! questions until the first send, a thinking spinner while a request is
//! outstanding, and slash commands for session control.
//! Entry point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
