//! Authentication infrastructure module
//!
//! Key material loading, secret stores and ES256 token signing.

mod jwt;
mod key_material;
mod secret_store;

#[cfg(test)]
pub(crate) mod test_keys;

pub use jwt::{TokenClaims, TokenConfig, TokenSigner, TOKEN_AUDIENCE, TOKEN_LIFETIME_SECS};
pub use key_material::KeyMaterialLoader;
pub use secret_store::{EnvSecretStore, InMemorySecretStore, SecretStore};
