//! API Key persistence trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::ApiKey;
use crate::domain::AscError;

/// Persistence backend for the API key registry
///
/// The registry is small and always read and written as a whole, in
/// insertion order.
#[async_trait]
pub trait ApiKeyRepository: Send + Sync + Debug {
    /// Load all persisted keys; an absent registry is empty
    async fn load(&self) -> Result<Vec<ApiKey>, AscError>;

    /// Replace the persisted registry with `keys`
    async fn save(&self, keys: &[ApiKey]) -> Result<(), AscError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// Mock API key repository for testing
    #[derive(Debug, Default)]
    pub struct MockApiKeyRepository {
        keys: Arc<RwLock<Vec<ApiKey>>>,
        should_fail: Arc<RwLock<bool>>,
        saves: Arc<RwLock<usize>>,
    }

    impl MockApiKeyRepository {
        /// Create a new mock repository
        pub fn new() -> Self {
            Self::default()
        }

        /// Set whether saves should fail
        pub async fn set_should_fail(&self, fail: bool) {
            *self.should_fail.write().await = fail;
        }

        /// Number of successful saves
        pub async fn save_count(&self) -> usize {
            *self.saves.read().await
        }

        /// Snapshot of what was last persisted
        pub async fn persisted(&self) -> Vec<ApiKey> {
            self.keys.read().await.clone()
        }
    }

    #[async_trait]
    impl ApiKeyRepository for MockApiKeyRepository {
        async fn load(&self) -> Result<Vec<ApiKey>, AscError> {
            Ok(self.keys.read().await.clone())
        }

        async fn save(&self, keys: &[ApiKey]) -> Result<(), AscError> {
            if *self.should_fail.read().await {
                return Err(AscError::storage("Mock repository configured to fail"));
            }
            *self.keys.write().await = keys.to_vec();
            *self.saves.write().await += 1;
            Ok(())
        }
    }
}
