use std::collections::BTreeMap;

use thiserror::Error;

use super::api_key::{ApiKey, ApiKeyValidationError};

/// Errors produced by the App Store Connect client layer
#[derive(Debug, Error)]
pub enum AscError {
    #[error("No API keys registered. Register a key before sending requests")]
    NoApiKeysRegistered,

    #[error("API key '{0}' not found")]
    ApiKeyNotFound(String),

    #[error("Failed to activate API key '{}'", .0.id())]
    ApiKeyActivationFailed(Box<ApiKey>),

    #[error("No data provided for '{0}'")]
    NoDataProvided(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Request failed: {source}")]
    RequestFailed {
        #[source]
        source: Box<AscError>,
    },

    #[error("{} requests failed", .0.len())]
    RequestFailedMultiple(Vec<AscError>),

    #[error("{operation} failed for {} of its requests: {}", .failures.len(), failed_ids(.failures))]
    RequestFailedPartially {
        operation: String,
        failures: BTreeMap<String, AscError>,
    },

    #[error("No {kind} found for '{key}'")]
    NotFound { kind: String, key: String },

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Key material error: {message}")]
    KeyMaterial { message: String },

    #[error("Token signing failed: {message}")]
    Signing { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

fn failed_ids(failures: &BTreeMap<String, AscError>) -> String {
    failures.keys().cloned().collect::<Vec<_>>().join(", ")
}

impl AscError {
    pub fn api_key_not_found(id: impl Into<String>) -> Self {
        Self::ApiKeyNotFound(id.into())
    }

    pub fn no_data_provided(field: impl Into<String>) -> Self {
        Self::NoDataProvided(field.into())
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn request_failed(source: AscError) -> Self {
        Self::RequestFailed {
            source: Box::new(source),
        }
    }

    pub fn not_found(kind: impl Into<String>, key: impl Into<String>) -> Self {
        Self::NotFound {
            kind: kind.into(),
            key: key.into(),
        }
    }

    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Self::Http {
            status,
            body: body.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn key_material(message: impl Into<String>) -> Self {
        Self::KeyMaterial {
            message: message.into(),
        }
    }

    pub fn signing(message: impl Into<String>) -> Self {
        Self::Signing {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Per-id failures of a partially failed batch, if this is one
    pub fn failures(&self) -> Option<&BTreeMap<String, AscError>> {
        match self {
            Self::RequestFailedPartially { failures, .. } => Some(failures),
            _ => None,
        }
    }
}

impl From<ApiKeyValidationError> for AscError {
    fn from(error: ApiKeyValidationError) -> Self {
        Self::InvalidInput(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_not_found_error() {
        let error = AscError::api_key_not_found("ABC123");
        assert_eq!(error.to_string(), "API key 'ABC123' not found");
    }

    #[test]
    fn test_not_found_error() {
        let error = AscError::not_found("bundle id", "com.example.app");
        assert_eq!(
            error.to_string(),
            "No bundle id found for 'com.example.app'"
        );
    }

    #[test]
    fn test_partial_failure_lists_ids() {
        let mut failures = BTreeMap::new();
        failures.insert("b".to_string(), AscError::http(404, "missing"));
        failures.insert("a".to_string(), AscError::transport("timeout"));

        let error = AscError::RequestFailedPartially {
            operation: "batch".to_string(),
            failures,
        };

        assert_eq!(error.to_string(), "batch failed for 2 of its requests: a, b");
    }

    #[test]
    fn test_validation_error_becomes_invalid_input() {
        let error: AscError = ApiKeyValidationError::EmptyIssuerId.into();
        assert!(matches!(error, AscError::InvalidInput(ref m) if m == "Issuer ID cannot be empty"));
    }

    #[test]
    fn test_request_failed_wraps_source() {
        let error = AscError::request_failed(AscError::http(500, "boom"));
        assert_eq!(error.to_string(), "Request failed: HTTP 500: boom");
        assert!(std::error::Error::source(&error).is_some());
    }
}
