//! Wiring shared by every command

use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use serde::Serialize;
use tracing::debug;

use crate::config::AppConfig;
use crate::domain::filter::Filter;
use crate::infrastructure::api_key::{CredentialStore, FileApiKeyRepository};
use crate::infrastructure::auth::EnvSecretStore;
use crate::infrastructure::http::ReqwestTransport;
use crate::infrastructure::logging;
use crate::infrastructure::services::{ApiClient, AscService};

/// Filters and page limit accepted by every listing command
#[derive(Args, Clone, Debug, Default)]
pub struct ListArgs {
    /// Filter as key=value, e.g. `-f email=jane@example.com`; repeatable
    #[arg(short = 'f', long = "filter")]
    pub filters: Vec<Filter>,

    /// Load a single page of at most this many items
    #[arg(long)]
    pub limit: Option<u32>,
}

/// Configured credential store and service
pub struct CliContext {
    pub config: AppConfig,
    pub key_id: Option<String>,
    pub store: Arc<CredentialStore>,
    pub service: AscService,
}

impl CliContext {
    /// Load configuration, start logging and open the key registry.
    ///
    /// `key_id` overrides `api.key_id` from configuration.
    pub async fn load(key_id: Option<String>) -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = AppConfig::load().unwrap_or_default();
        logging::init_logging(&config.logging);

        let key_id = key_id.or_else(|| config.api.key_id.clone());

        debug!(
            "Using key registry at {}",
            config.credentials.store_path.display()
        );

        let repository = Arc::new(FileApiKeyRepository::new(
            config.credentials.store_path.clone(),
        ));
        let secrets = Arc::new(EnvSecretStore::new(
            config.credentials.secret_env_prefix.clone(),
        ));
        let store = Arc::new(CredentialStore::load(repository, secrets).await?);

        let client = ApiClient::new(Arc::new(ReqwestTransport::new()), store.clone())
            .with_base_url(&config.api.base_url)?
            .with_timeout(Duration::from_secs(config.api.timeout_secs))
            .with_key_id(key_id.clone());

        Ok(Self {
            config,
            key_id,
            store,
            service: AscService::new(client),
        })
    }
}

/// Write `value` to stdout as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
