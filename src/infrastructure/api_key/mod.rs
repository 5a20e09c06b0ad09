//! API Key infrastructure implementations
//!
//! Registry persistence backends and the credential store that owns the
//! registry and signs tokens.

mod file_repository;
mod repository;
mod store;

pub use file_repository::FileApiKeyRepository;
pub use repository::InMemoryApiKeyRepository;
pub use store::CredentialStore;
