use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::endpoint::{DEFAULT_HOST, REQUEST_TIMEOUT};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub credentials: CredentialsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Scheme, host and optional port requests are sent to
    pub base_url: String,
    pub timeout_secs: u64,
    /// Registered key to sign with instead of the active one
    pub key_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    /// JSON file holding the key registry
    pub store_path: PathBuf,
    /// Prefix of environment variables that hold keychain secrets
    pub secret_env_prefix: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: format!("https://{}", DEFAULT_HOST),
            timeout_secs: REQUEST_TIMEOUT.as_secs(),
            key_id: None,
        }
    }
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            secret_env_prefix: "ASC_SECRET_".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::default(),
        }
    }
}

fn default_store_path() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".asc")
        .join("api_keys.json")
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("ASC")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api.base_url, "https://api.appstoreconnect.apple.com");
        assert_eq!(config.api.timeout_secs, 30);
        assert!(config.api.key_id.is_none());
        assert!(config.credentials.store_path.ends_with(".asc/api_keys.json"));
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_partial_source_keeps_defaults() {
        let config: AppConfig = config::Config::builder()
            .set_override("api.key_id", "2X9R4HXF34")
            .unwrap()
            .set_override("logging.format", "json")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.api.key_id.as_deref(), Some("2X9R4HXF34"));
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.credentials.secret_env_prefix, "ASC_SECRET_");
    }
}
