//! API Key domain
//!
//! Registered App Store Connect API keys, where their private key material
//! lives, and the persistence seam for the key registry.

mod entity;
mod repository;
mod token;
mod validation;

pub use entity::{ApiKey, ApiKeyId, KeySource};
pub use repository::ApiKeyRepository;
pub use token::TokenProvider;
pub use validation::{validate_api_key_id, validate_issuer_id, ApiKeyValidationError};
