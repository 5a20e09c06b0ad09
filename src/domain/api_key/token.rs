//! Bearer token seam between the key registry and the HTTP client

use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::AscError;

/// Mints bearer tokens for outgoing requests
#[async_trait]
pub trait TokenProvider: Send + Sync + Debug {
    /// Token signed with `key_id`, or with the active key when `None`
    async fn create_token(&self, key_id: Option<&str>) -> Result<String, AscError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns a fixed token, or fails every call
    #[derive(Debug)]
    pub struct StaticTokenProvider {
        token: Option<String>,
        calls: AtomicUsize,
    }

    impl StaticTokenProvider {
        pub fn new(token: impl Into<String>) -> Self {
            Self {
                token: Some(token.into()),
                calls: AtomicUsize::new(0),
            }
        }

        /// A provider with no registered keys
        pub fn failing() -> Self {
            Self {
                token: None,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TokenProvider for StaticTokenProvider {
        async fn create_token(&self, _key_id: Option<&str>) -> Result<String, AscError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.token.clone().ok_or(AscError::NoApiKeysRegistered)
        }
    }
}
