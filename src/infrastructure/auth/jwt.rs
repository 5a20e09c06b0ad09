//! ES256 bearer tokens for App Store Connect

use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::api_key::ApiKey;
use crate::domain::AscError;

/// Audience every App Store Connect token must carry
pub const TOKEN_AUDIENCE: &str = "appstoreconnect-v1";

/// Token lifetime in seconds; the server rejects anything above 20 minutes
pub const TOKEN_LIFETIME_SECS: i64 = 1200;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Issuer ID of the key's team
    pub iss: String,
    pub aud: String,
    /// Issued at timestamp (Unix epoch)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
}

impl TokenClaims {
    pub fn new(issuer_id: impl Into<String>, lifetime_secs: i64) -> Self {
        let iat = Utc::now().timestamp();
        Self {
            iss: issuer_id.into(),
            aud: TOKEN_AUDIENCE.to_string(),
            iat,
            exp: iat + lifetime_secs,
        }
    }
}

/// Configuration for the token signer
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub lifetime_secs: i64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            lifetime_secs: TOKEN_LIFETIME_SECS,
        }
    }
}

/// Signs short-lived tokens with a key's private PEM
#[derive(Debug, Clone, Default)]
pub struct TokenSigner {
    config: TokenConfig,
}

impl TokenSigner {
    pub fn new(config: TokenConfig) -> Self {
        Self { config }
    }

    /// Sign a token for `key` using its PKCS#8 EC private key `pem`
    pub fn sign(&self, key: &ApiKey, pem: &str) -> Result<String, AscError> {
        let encoding_key = EncodingKey::from_ec_pem(pem.as_bytes()).map_err(|e| {
            AscError::key_material(format!("Invalid private key for '{}': {}", key.id(), e))
        })?;

        let mut header = Header::new(Algorithm::ES256);
        header.kid = Some(key.id().to_string());

        let claims = TokenClaims::new(key.issuer_id(), self.config.lifetime_secs);

        encode(&header, &claims, &encoding_key)
            .map_err(|e| AscError::signing(format!("Failed to sign token: {}", e)))
    }
}
