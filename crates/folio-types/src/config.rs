//! Client configuration types for Folio.
//!
//! `ClientConfig` represents the `config.toml` in the data directory that
//! points the client at a chat endpoint and customizes the seeded texts.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

pub const DEFAULT_GREETING: &str = "Hi! I'm Alex's AI assistant, ask me anything about his \
background, projects, or skills. I'm powered by real resume data.";

pub const DEFAULT_RESET_GREETING: &str = "Fresh start! Ask me anything about Alex.";

pub const DEFAULT_SUGGESTED_QUESTIONS: [&str; 5] = [
    "What's your tech stack?",
    "Tell me about your experience",
    "What projects have you built?",
    "Where did you study?",
    "What are your strengths?",
];

/// Which backend persists the session identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// `session.json` in the data directory.
    #[default]
    File,
    /// `folio.db` in the data directory.
    Sqlite,
    /// Process-local; a new session on every run.
    Memory,
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKind::File => write!(f, "file"),
            StoreKind::Sqlite => write!(f, "sqlite"),
            StoreKind::Memory => write!(f, "memory"),
        }
    }
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" | "json" => Ok(StoreKind::File),
            "sqlite" | "db" => Ok(StoreKind::Sqlite),
            "memory" | "mem" => Ok(StoreKind::Memory),
            other => Err(format!("invalid store kind: '{other}'")),
        }
    }
}

/// Top-level client configuration. All fields have defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the portfolio API (without the `/api/...` path).
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout. Unset means the HTTP client's default.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    #[serde(default)]
    pub store: StoreKind,

    /// Seeded assistant message for a newly constructed session.
    #[serde(default = "default_greeting")]
    pub greeting: String,

    /// Seeded assistant message after a reset.
    #[serde(default = "default_reset_greeting")]
    pub reset_greeting: String,

    #[serde(default = "default_suggested_questions")]
    pub suggested_questions: Vec<String>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_greeting() -> String {
    DEFAULT_GREETING.to_string()
}

fn default_reset_greeting() -> String {
    DEFAULT_RESET_GREETING.to_string()
}

fn default_suggested_questions() -> Vec<String> {
    DEFAULT_SUGGESTED_QUESTIONS
        .iter()
        .map(|q| q.to_string())
        .collect()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_secs: None,
            store: StoreKind::default(),
            greeting: default_greeting(),
            reset_greeting: default_reset_greeting(),
            suggested_questions: default_suggested_questions(),
        }
    }
}
