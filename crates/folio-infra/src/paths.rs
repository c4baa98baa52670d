//! Data directory layout.
//!
//! Everything Folio persists lives under one directory:
//! `config.toml`, `session.json` and `folio.db`.

use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "FOLIO_DATA_DIR";

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `FOLIO_DATA_DIR` environment variable
/// 2. `~/.folio`
/// 3. `./.folio` when no home directory is known
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".folio");
    }

    PathBuf::from(".folio")
}

pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}

pub fn session_file_path(data_dir: &Path) -> PathBuf {
    data_dir.join("session.json")
}

pub fn database_path(data_dir: &Path) -> PathBuf {
    data_dir.join("folio.db")
}

/// sqlx connection URL for the database file, created on first use.
pub fn database_url(data_dir: &Path) -> String {
    format!("sqlite://{}?mode=rwc", database_path(data_dir).display())
}
