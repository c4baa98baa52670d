//! CLI command definitions for the `folio` binary.
//!
//! Uses clap derive macros for argument parsing. Global flags control
//! output format, verbosity, and which endpoint/store the session uses.

pub mod ask;
pub mod chat;
pub mod format;
pub mod remote;
pub mod session;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use folio_types::config::StoreKind;

/// Chat with a portfolio's AI assistant from the terminal.
#[derive(Parser)]
#[command(name = "folio", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Base URL of the portfolio API (overrides config.toml).
    #[arg(long, global = true, env = "FOLIO_API_URL")]
    pub api_url: Option<String>,

    /// Directory holding config.toml and the session store.
    #[arg(long, global = true, env = "FOLIO_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Session store backend: file, sqlite, or memory.
    #[arg(long, global = true)]
    pub store: Option<StoreKind>,

    /// Request timeout in seconds (default: no timeout).
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    /// Write log lines to stderr as JSON objects.
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session.
    Chat {
        /// Start with a fresh session instead of resuming the stored one.
        #[arg(long)]
        new: bool,
    },

    /// Send a single message and print the reply.
    Ask {
        /// The question to send.
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },

    /// Inspect or reset the stored session.
    Session {
        #[command(subcommand)]
        action: SessionCommand,
    },

    /// Show the server-side transcript of the current session.
    History,

    /// Check that the portfolio API is reachable and healthy.
    Health,

    /// Print the suggested starter questions.
    Suggestions,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum SessionCommand {
    /// Show the current session identifier and where it is stored.
    Show,

    /// Replace the stored session identifier with a fresh one.
    Reset,
}
