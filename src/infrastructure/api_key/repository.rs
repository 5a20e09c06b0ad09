//! In-memory API key repository implementation

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::api_key::{ApiKey, ApiKeyRepository};
use crate::domain::AscError;

/// In-memory implementation of ApiKeyRepository
#[derive(Debug, Default)]
pub struct InMemoryApiKeyRepository {
    keys: Arc<RwLock<Vec<ApiKey>>>,
}

impl InMemoryApiKeyRepository {
    /// Create a new in-memory repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository with initial keys
    pub fn with_keys(keys: Vec<ApiKey>) -> Self {
        Self {
            keys: Arc::new(RwLock::new(keys)),
        }
    }
}

#[async_trait]
impl ApiKeyRepository for InMemoryApiKeyRepository {
    async fn load(&self) -> Result<Vec<ApiKey>, AscError> {
        Ok(self.keys.read().await.clone())
    }

    async fn save(&self, keys: &[ApiKey]) -> Result<(), AscError> {
        *self.keys.write().await = keys.to_vec();
        Ok(())
    }
}
