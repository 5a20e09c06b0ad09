//! Credential store
//!
//! Owns the registry of API keys, keeps at most one of them active and
//! mints bearer tokens with the selected key.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::api_key::{ApiKey, ApiKeyRepository, TokenProvider};
use crate::domain::AscError;
use crate::infrastructure::auth::{KeyMaterialLoader, SecretStore, TokenSigner};

/// Registry of API keys with persistence and token minting
#[derive(Debug)]
pub struct CredentialStore {
    repository: Arc<dyn ApiKeyRepository>,
    keys: Mutex<Vec<ApiKey>>,
    material: KeyMaterialLoader,
    signer: TokenSigner,
}

impl CredentialStore {
    /// Create a store from the persisted registry
    pub async fn load(
        repository: Arc<dyn ApiKeyRepository>,
        secrets: Arc<dyn SecretStore>,
    ) -> Result<Self, AscError> {
        let mut keys = repository.load().await?;

        let mut seen_active = false;
        for key in keys.iter_mut().filter(|k| k.is_active()) {
            if seen_active {
                warn!("Deactivating extra active key '{}' found in registry", key.id());
                key.set_active(false);
            }
            seen_active = true;
        }

        debug!("Loaded {} API keys", keys.len());

        Ok(Self {
            repository,
            keys: Mutex::new(keys),
            material: KeyMaterialLoader::new(secrets),
            signer: TokenSigner::default(),
        })
    }

    /// Create with a custom token signer
    pub fn with_signer(mut self, signer: TokenSigner) -> Self {
        self.signer = signer;
        self
    }

    /// Registered keys in insertion order
    pub async fn list_keys(&self) -> Vec<ApiKey> {
        self.keys.lock().await.clone()
    }

    pub async fn active_key(&self) -> Option<ApiKey> {
        self.keys.lock().await.iter().find(|k| k.is_active()).cloned()
    }

    /// Register a new key. It becomes active only when no key is active yet.
    pub async fn register(&self, mut key: ApiKey) -> Result<ApiKey, AscError> {
        let mut keys = self.keys.lock().await;

        if keys.iter().any(|k| k.id() == key.id()) {
            return Err(AscError::invalid_input(format!(
                "API key '{}' is already registered",
                key.id()
            )));
        }

        let activate = !keys.iter().any(ApiKey::is_active);
        key.set_active(activate);

        let mut updated = keys.clone();
        updated.push(key.clone());
        self.repository.save(&updated).await?;
        *keys = updated;

        info!(
            "Registered API key: id={}, name={}, source={}, active={}",
            key.id(),
            key.name(),
            key.source().describe(),
            activate
        );
        Ok(key)
    }

    /// Make `id` the only active key
    pub async fn activate(&self, id: &str) -> Result<ApiKey, AscError> {
        let mut keys = self.keys.lock().await;

        if !keys.iter().any(|k| k.id() == id) {
            return Err(AscError::api_key_not_found(id));
        }

        let mut updated = keys.clone();
        for key in updated.iter_mut() {
            key.set_active(key.id() == id);
        }

        let activated = updated
            .iter()
            .find(|k| k.id() == id)
            .cloned()
            .ok_or_else(|| AscError::api_key_not_found(id))?;

        if !activated.is_active() || updated.iter().filter(|k| k.is_active()).count() != 1 {
            return Err(AscError::ApiKeyActivationFailed(Box::new(activated)));
        }

        self.repository.save(&updated).await?;
        *keys = updated;

        info!("Activated API key: id={}", id);
        Ok(activated)
    }

    /// Remove `id`. No other key is promoted when the active key goes.
    pub async fn delete(&self, id: &str) -> Result<ApiKey, AscError> {
        let mut keys = self.keys.lock().await;

        let position = keys
            .iter()
            .position(|k| k.id() == id)
            .ok_or_else(|| AscError::api_key_not_found(id))?;

        let mut updated = keys.clone();
        let removed = updated.remove(position);
        self.repository.save(&updated).await?;
        *keys = updated;

        info!("Deleted API key: id={}, was_active={}", id, removed.is_active());
        Ok(removed)
    }

    /// Sign a token with `key_id`, or with the active key when `None`
    pub async fn create_token(&self, key_id: Option<&str>) -> Result<String, AscError> {
        let key = {
            let keys = self.keys.lock().await;
            match key_id {
                Some(id) => keys
                    .iter()
                    .find(|k| k.id() == id)
                    .cloned()
                    .ok_or_else(|| AscError::api_key_not_found(id))?,
                None => keys
                    .iter()
                    .find(|k| k.is_active())
                    .cloned()
                    .ok_or(AscError::NoApiKeysRegistered)?,
            }
        };

        let pem = self.material.load(key.source()).await?;
        let token = self.signer.sign(&key, &pem)?;

        debug!("Created token with key '{}'", key.id());
        Ok(token)
    }
}

#[async_trait]
impl TokenProvider for CredentialStore {
    async fn create_token(&self, key_id: Option<&str>) -> Result<String, AscError> {
        CredentialStore::create_token(self, key_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::api_key::mock::MockApiKeyRepository;
    use crate::domain::api_key::{ApiKeyId, KeySource};
    use crate::infrastructure::api_key::InMemoryApiKeyRepository;
    use crate::infrastructure::auth::test_keys::{TEST_PRIVATE_KEY, TEST_PUBLIC_KEY};
    use crate::infrastructure::auth::{
        InMemorySecretStore, TokenClaims, TokenConfig, TOKEN_AUDIENCE,
    };
    use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};

    fn create_test_key(id: &str) -> ApiKey {
        ApiKey::new(
            ApiKeyId::new(id).unwrap(),
            format!("Key {}", id),
            KeySource::Inline(TEST_PRIVATE_KEY.to_string()),
            "69a6de70-03db-47e3-e053-5b8c7c11a4d1",
        )
        .unwrap()
    }

    async fn create_store() -> CredentialStore {
        CredentialStore::load(
            Arc::new(InMemoryApiKeyRepository::new()),
            Arc::new(InMemorySecretStore::new()),
        )
        .await
        .unwrap()
    }

    async fn active_ids(store: &CredentialStore) -> Vec<String> {
        store
            .list_keys()
            .await
            .iter()
            .filter(|k| k.is_active())
            .map(|k| k.id().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_first_registered_key_becomes_active() {
        let store = create_store().await;

        let first = store.register(create_test_key("KEY1")).await.unwrap();
        let second = store.register(create_test_key("KEY2")).await.unwrap();

        assert!(first.is_active());
        assert!(!second.is_active());
        assert_eq!(active_ids(&store).await, vec!["KEY1"]);
    }

    #[tokio::test]
    async fn test_register_duplicate_is_rejected() {
        let store = create_store().await;
        store.register(create_test_key("KEY1")).await.unwrap();

        let result = store.register(create_test_key("KEY1")).await;
        assert!(matches!(result, Err(AscError::InvalidInput(_))));
        assert_eq!(store.list_keys().await.len(), 1);
    }

    #[tokio::test]
    async fn test_activate_switches_active_key() {
        let store = create_store().await;
        store.register(create_test_key("KEY1")).await.unwrap();
        store.register(create_test_key("KEY2")).await.unwrap();

        let activated = store.activate("KEY2").await.unwrap();
        assert!(activated.is_active());
        assert_eq!(active_ids(&store).await, vec!["KEY2"]);
    }

    #[tokio::test]
    async fn test_activate_unknown_key() {
        let store = create_store().await;
        let result = store.activate("NOPE").await;
        assert!(matches!(result, Err(AscError::ApiKeyNotFound(ref id)) if id == "NOPE"));
    }

    #[tokio::test]
    async fn test_delete_unknown_key_leaves_registry_unchanged() {
        let store = create_store().await;
        store.register(create_test_key("KEY1")).await.unwrap();
        let before = store.list_keys().await;

        let result = store.delete("NOPE").await;
        assert!(matches!(result, Err(AscError::ApiKeyNotFound(ref id)) if id == "NOPE"));
        assert_eq!(store.list_keys().await, before);
    }

    #[tokio::test]
    async fn test_delete_active_key_does_not_promote() {
        let store = create_store().await;
        store.register(create_test_key("KEY1")).await.unwrap();
        store.register(create_test_key("KEY2")).await.unwrap();

        let removed = store.delete("KEY1").await.unwrap();
        assert!(removed.is_active());
        assert!(active_ids(&store).await.is_empty());
        assert!(store.active_key().await.is_none());
    }

    #[tokio::test]
    async fn test_at_most_one_active_key_across_operations() {
        let store = create_store().await;
        let ids = ["KEY1", "KEY2", "KEY3", "KEY4"];

        // Deterministic pseudo-random walk over register/activate/delete
        let mut state: u32 = 7;
        for _ in 0..200 {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let id = ids[(state >> 8) as usize % ids.len()];
            let _ = match (state >> 16) % 3 {
                0 => store.register(create_test_key(id)).await.map(|_| ()),
                1 => store.activate(id).await.map(|_| ()),
                _ => store.delete(id).await.map(|_| ()),
            };
            assert!(active_ids(&store).await.len() <= 1);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_at_most_one_active_key_under_concurrency() {
        let repository = Arc::new(MockApiKeyRepository::new());
        let store = Arc::new(
            CredentialStore::load(repository.clone(), Arc::new(InMemorySecretStore::new()))
                .await
                .unwrap(),
        );
        for i in 0..8 {
            store.register(create_test_key(&format!("KEY{}", i))).await.unwrap();
        }

        let mut tasks = tokio::task::JoinSet::new();
        for i in 0..300usize {
            let store = store.clone();
            tasks.spawn(async move {
                let _ = match i % 3 {
                    0 => store
                        .register(create_test_key(&format!("NEW{}", i)))
                        .await
                        .map(|_| ()),
                    1 => store.activate(&format!("KEY{}", i % 8)).await.map(|_| ()),
                    _ => store.delete(&format!("NEW{}", i - 2)).await.map(|_| ()),
                };
                active_ids(&store).await.len()
            });
        }

        while let Some(active) = tasks.join_next().await {
            assert!(active.unwrap() <= 1);
        }

        assert!(active_ids(&store).await.len() <= 1);
        let persisted_active = repository
            .persisted()
            .await
            .iter()
            .filter(|k| k.is_active())
            .count();
        assert!(persisted_active <= 1);
        assert_eq!(repository.persisted().await, store.list_keys().await);
    }

    #[tokio::test]
    async fn test_custom_signer_lifetime() {
        let store = create_store()
            .await
            .with_signer(TokenSigner::new(TokenConfig { lifetime_secs: 300 }));
        store.register(create_test_key("KEY1")).await.unwrap();

        let token = store.create_token(None).await.unwrap();

        let mut validation = Validation::new(Algorithm::ES256);
        validation.set_audience(&[TOKEN_AUDIENCE]);
        let claims = decode::<TokenClaims>(
            &token,
            &DecodingKey::from_ec_pem(TEST_PUBLIC_KEY.as_bytes()).unwrap(),
            &validation,
        )
        .unwrap()
        .claims;
        assert_eq!(claims.exp - claims.iat, 300);
    }

    #[tokio::test]
    async fn test_failed_persist_leaves_registry_unchanged() {
        let repository = Arc::new(MockApiKeyRepository::new());
        let store = CredentialStore::load(repository.clone(), Arc::new(InMemorySecretStore::new()))
            .await
            .unwrap();
        store.register(create_test_key("KEY1")).await.unwrap();

        repository.set_should_fail(true).await;

        assert!(matches!(
            store.register(create_test_key("KEY2")).await,
            Err(AscError::Storage { .. })
        ));
        assert!(store.delete("KEY1").await.is_err());

        let keys = store.list_keys().await;
        assert_eq!(keys.len(), 1);
        assert!(keys[0].is_active());
        assert_eq!(repository.save_count().await, 1);
        assert_eq!(repository.persisted().await, keys);
    }

    #[tokio::test]
    async fn test_load_keeps_single_active_key() {
        let mut first = create_test_key("KEY1");
        let mut second = create_test_key("KEY2");
        first.set_active(true);
        second.set_active(true);

        let store = CredentialStore::load(
            Arc::new(InMemoryApiKeyRepository::with_keys(vec![first, second])),
            Arc::new(InMemorySecretStore::new()),
        )
        .await
        .unwrap();

        assert_eq!(active_ids(&store).await, vec!["KEY1"]);
    }

    #[tokio::test]
    async fn test_create_token_without_keys() {
        let store = create_store().await;
        let result = store.create_token(None).await;
        assert!(matches!(result, Err(AscError::NoApiKeysRegistered)));
    }

    #[tokio::test]
    async fn test_create_token_with_unknown_key() {
        let store = create_store().await;
        store.register(create_test_key("KEY1")).await.unwrap();

        let result = store.create_token(Some("MISSING")).await;
        assert!(matches!(result, Err(AscError::ApiKeyNotFound(ref id)) if id == "MISSING"));
    }

    #[tokio::test]
    async fn test_create_token_without_active_key() {
        let store = create_store().await;
        store.register(create_test_key("KEY1")).await.unwrap();
        store.delete("KEY1").await.unwrap();
        store.register(create_test_key("KEY2")).await.unwrap();
        store.register(create_test_key("KEY3")).await.unwrap();
        store.delete("KEY2").await.unwrap();

        // KEY3 was registered while KEY2 was active
        assert!(matches!(
            store.create_token(None).await,
            Err(AscError::NoApiKeysRegistered)
        ));
        assert!(store.create_token(Some("KEY3")).await.is_ok());
    }

    #[tokio::test]
    async fn test_token_uses_selected_key() {
        let store = create_store().await;
        store.register(create_test_key("KEY1")).await.unwrap();
        store.register(create_test_key("KEY2")).await.unwrap();

        let token = store.create_token(Some("KEY2")).await.unwrap();
        assert_eq!(decode_header(&token).unwrap().kid.as_deref(), Some("KEY2"));

        let token = store.create_token(None).await.unwrap();
        assert_eq!(decode_header(&token).unwrap().kid.as_deref(), Some("KEY1"));

        let mut validation = Validation::new(Algorithm::ES256);
        validation.set_audience(&[TOKEN_AUDIENCE]);
        let claims = decode::<TokenClaims>(
            &token,
            &DecodingKey::from_ec_pem(TEST_PUBLIC_KEY.as_bytes()).unwrap(),
            &validation,
        )
        .unwrap()
        .claims;
        assert_eq!(claims.exp - claims.iat, 1200);
    }

    #[tokio::test]
    async fn test_token_from_keychain_reference() {
        let secrets = InMemorySecretStore::new();
        secrets.insert("ci-key", TEST_PRIVATE_KEY).await;

        let store = CredentialStore::load(
            Arc::new(InMemoryApiKeyRepository::new()),
            Arc::new(secrets),
        )
        .await
        .unwrap();

        let key = ApiKey::new(
            ApiKeyId::new("KEYCHAIN1").unwrap(),
            "Keychain",
            KeySource::Keychain("ci-key".to_string()),
            "issuer",
        )
        .unwrap();
        store.register(key).await.unwrap();

        assert!(store.create_token(None).await.is_ok());
    }

    #[tokio::test]
    async fn test_token_with_missing_secret_fails() {
        let store = create_store().await;
        let key = ApiKey::new(
            ApiKeyId::new("KEYCHAIN1").unwrap(),
            "Keychain",
            KeySource::Keychain("absent".to_string()),
            "issuer",
        )
        .unwrap();
        store.register(key).await.unwrap();

        assert!(matches!(
            store.create_token(None).await,
            Err(AscError::KeyMaterial { .. })
        ));
    }
}
