//! Loading private key material for a registered key

use std::sync::Arc;

use tracing::debug;

use super::secret_store::SecretStore;
use crate::domain::api_key::KeySource;
use crate::domain::AscError;

/// Reads the PEM text a `KeySource` points at
#[derive(Debug, Clone)]
pub struct KeyMaterialLoader {
    secrets: Arc<dyn SecretStore>,
}

impl KeyMaterialLoader {
    pub fn new(secrets: Arc<dyn SecretStore>) -> Self {
        Self { secrets }
    }

    pub async fn load(&self, source: &KeySource) -> Result<String, AscError> {
        debug!("Loading key material from {}", source.describe());

        let pem = match source {
            KeySource::LocalFilePath(path) => {
                tokio::fs::read_to_string(path).await.map_err(|e| {
                    AscError::key_material(format!(
                        "Failed to read key file '{}': {}",
                        path.display(),
                        e
                    ))
                })?
            }
            KeySource::Keychain(reference) => self.secrets.get_secret(reference).await?,
            KeySource::Inline(pem) => pem.clone(),
        };

        if pem.trim().is_empty() {
            return Err(AscError::key_material(format!(
                "Key material from {} is empty",
                source.describe()
            )));
        }

        Ok(pem)
    }
}
