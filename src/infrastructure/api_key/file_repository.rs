//! JSON file backed API key repository

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::domain::api_key::{ApiKey, ApiKeyRepository};
use crate::domain::AscError;

/// Persists the registry as a pretty-printed JSON array.
///
/// A missing file is an empty registry.
#[derive(Debug, Clone)]
pub struct FileApiKeyRepository {
    path: PathBuf,
}

impl FileApiKeyRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ApiKeyRepository for FileApiKeyRepository {
    async fn load(&self) -> Result<Vec<ApiKey>, AscError> {
        let content = match tokio::fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No key registry at {}", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(AscError::storage(format!(
                    "Failed to read '{}': {}",
                    self.path.display(),
                    e
                )))
            }
        };

        serde_json::from_slice(&content).map_err(|e| {
            AscError::storage(format!("Corrupt key registry '{}': {}", self.path.display(), e))
        })
    }

    async fn save(&self, keys: &[ApiKey]) -> Result<(), AscError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AscError::storage(format!("Failed to create '{}': {}", parent.display(), e))
            })?;
        }

        let json = serde_json::to_vec_pretty(keys)
            .map_err(|e| AscError::storage(format!("Failed to serialize keys: {}", e)))?;

        // Write aside then rename so a crash never leaves a truncated registry
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await.map_err(|e| {
            AscError::storage(format!("Failed to write '{}': {}", tmp.display(), e))
        })?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            AscError::storage(format!("Failed to replace '{}': {}", self.path.display(), e))
        })?;

        debug!("Saved {} keys to {}", keys.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::api_key::{ApiKeyId, KeySource};

    fn temp_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("asc-kit-{}", uuid::Uuid::new_v4()))
            .join("api_keys.json")
    }

    fn create_test_key(id: &str, source: KeySource) -> ApiKey {
        ApiKey::new(ApiKeyId::new(id).unwrap(), "Test", source, "issuer").unwrap()
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let repo = FileApiKeyRepository::new(temp_path());
        assert!(repo.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let path = temp_path();
        let repo = FileApiKeyRepository::new(&path);

        let keys = vec![
            create_test_key("FILEKEY1", KeySource::LocalFilePath("/keys/a.p8".into())),
            create_test_key("KEYCHAIN1", KeySource::Keychain("ci".to_string())),
        ];
        repo.save(&keys).await.unwrap();

        let loaded = repo.load().await.unwrap();
        assert_eq!(loaded, keys);

        let raw: serde_json::Value =
            serde_json::from_slice(&tokio::fs::read(&path).await.unwrap()).unwrap();
        assert_eq!(raw[0]["source"]["localFilePath"], "/keys/a.p8");
        assert_eq!(raw[1]["source"]["keychain"], "ci");
        assert_eq!(raw[1]["issuerId"], "issuer");

        if let Some(parent) = path.parent() {
            tokio::fs::remove_dir_all(parent).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_corrupt_file_is_storage_error() {
        let path = temp_path();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.unwrap();
        }
        tokio::fs::write(&path, "not json").await.unwrap();

        let result = FileApiKeyRepository::new(&path).load().await;
        assert!(matches!(result, Err(AscError::Storage { .. })));

        if let Some(parent) = path.parent() {
            tokio::fs::remove_dir_all(parent).await.unwrap();
        }
    }
}
