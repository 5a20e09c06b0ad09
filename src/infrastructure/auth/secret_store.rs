//! Secret stores resolving keychain references to PEM text

use async_trait::async_trait;
use std::collections::HashMap;
use std::env;
use std::fmt::Debug;
use tokio::sync::RwLock;

use crate::domain::AscError;

/// Resolves a keychain reference of a `KeySource::Keychain` key
#[async_trait]
pub trait SecretStore: Send + Sync + Debug {
    async fn get_secret(&self, reference: &str) -> Result<String, AscError>;
}

/// Secret store backed by environment variables
///
/// A reference maps to `<prefix><REFERENCE>`, upper-cased with every
/// character outside `[A-Z0-9_]` replaced by `_`.
#[derive(Debug, Clone)]
pub struct EnvSecretStore {
    prefix: String,
}

impl EnvSecretStore {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn variable_name(&self, reference: &str) -> String {
        let suffix: String = reference
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect();
        format!("{}{}", self.prefix, suffix)
    }
}

#[async_trait]
impl SecretStore for EnvSecretStore {
    async fn get_secret(&self, reference: &str) -> Result<String, AscError> {
        let variable = self.variable_name(reference);
        env::var(&variable).map_err(|_| {
            AscError::key_material(format!(
                "Environment variable '{}' not set for keychain reference '{}'",
                variable, reference
            ))
        })
    }
}

/// In-memory secret store
#[derive(Debug, Default)]
pub struct InMemorySecretStore {
    secrets: RwLock<HashMap<String, String>>,
}

impl InMemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, reference: impl Into<String>, secret: impl Into<String>) {
        self.secrets
            .write()
            .await
            .insert(reference.into(), secret.into());
    }
}

#[async_trait]
impl SecretStore for InMemorySecretStore {
    async fn get_secret(&self, reference: &str) -> Result<String, AscError> {
        self.secrets
            .read()
            .await
            .get(reference)
            .cloned()
            .ok_or_else(|| {
                AscError::key_material(format!("No secret stored for reference '{}'", reference))
            })
    }
}
