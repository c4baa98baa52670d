//! Client configuration loader for Folio.
//!
//! Reads `config.toml` from the data directory (`~/.folio/` by default) and
//! deserializes it into [`ClientConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::Path;

use folio_types::config::{ClientConfig, StoreKind};

use crate::paths;

/// Load client configuration from `{data_dir}/config.toml`.
///
/// - Missing file: [`ClientConfig::default()`].
/// - Unreadable or unparseable file: a warning is logged and the default is returned.
pub async fn load_client_config(data_dir: &Path) -> ClientConfig {
    let config_path = paths::config_path(data_dir);

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ClientConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ClientConfig::default();
        }
    };

    match toml::from_str::<ClientConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ClientConfig::default()
        }
    }
}

/// Command-line / environment overrides applied on top of the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub store: Option<StoreKind>,
    pub request_timeout_secs: Option<u64>,
}

/// Apply overrides. Blank URL overrides are ignored.
pub fn apply_overrides(mut config: ClientConfig, overrides: &ConfigOverrides) -> ClientConfig {
    if let Some(url) = overrides
        .api_url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
    {
        config.api_url = url.to_string();
    }
    if let Some(store) = overrides.store {
        config.store = store;
    }
    if let Some(secs) = overrides.request_timeout_secs {
        config.request_timeout_secs = Some(secs);
    }
    config
}
