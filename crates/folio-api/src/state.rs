//! Application state wiring the chat session together.
//!
//! `ChatSession` is generic over its store and endpoint; AppState pins it
//! to the concrete folio-infra implementations chosen by the config.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::debug;

use folio_core::chat::session::{ChatSession, SessionConfig};
use folio_infra::config::{ConfigOverrides, apply_overrides, load_client_config};
use folio_infra::http::HttpChatEndpoint;
use folio_infra::paths::resolve_data_dir;
use folio_infra::store::ConfiguredStore;
use folio_types::config::ClientConfig;

use crate::cli::Cli;

pub type ConcreteChatSession = ChatSession<ConfiguredStore, HttpChatEndpoint>;

/// Shared state for every command.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<ConcreteChatSession>,
    pub config: ClientConfig,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Resolve the data dir and config, open the store, and construct the session.
    pub async fn init(cli: &Cli) -> anyhow::Result<Self> {
        let data_dir = cli.data_dir.clone().unwrap_or_else(resolve_data_dir);

        let overrides = ConfigOverrides {
            api_url: cli.api_url.clone(),
            store: cli.store,
            request_timeout_secs: cli.timeout,
        };
        let config = apply_overrides(load_client_config(&data_dir).await, &overrides);
        debug!(
            data_dir = %data_dir.display(),
            api_url = %config.api_url,
            store = %config.store,
            "Resolved client configuration"
        );

        let endpoint = HttpChatEndpoint::new(
            &config.api_url,
            config.request_timeout_secs.map(Duration::from_secs),
        )
        .with_context(|| format!("Invalid API URL '{}'", config.api_url))?;

        let store = ConfiguredStore::open(config.store, &data_dir)
            .await
            .with_context(|| {
                format!(
                    "Failed to open {} session store in {}",
                    config.store,
                    data_dir.display()
                )
            })?;

        let session = ChatSession::open(store, endpoint, SessionConfig::from(&config)).await;

        Ok(Self {
            session: Arc::new(session),
            config,
            data_dir,
        })
    }
}
