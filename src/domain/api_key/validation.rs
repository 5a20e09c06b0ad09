//! Shape checks for App Store Connect key and issuer ids

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiKeyValidationError {
    #[error("API key ID cannot be empty")]
    EmptyId,

    #[error("API key ID may only contain uppercase letters and digits, found '{0}'")]
    InvalidCharacter(char),

    #[error("Issuer ID cannot be empty")]
    EmptyIssuerId,

    #[error("Issuer ID cannot contain whitespace")]
    IssuerIdWhitespace,
}

/// Key ids are issued as short uppercase alphanumeric strings, e.g. `2X9R4HXF34`
pub fn validate_api_key_id(id: &str) -> Result<(), ApiKeyValidationError> {
    if id.is_empty() {
        return Err(ApiKeyValidationError::EmptyId);
    }

    match id
        .chars()
        .find(|c| !(c.is_ascii_uppercase() || c.is_ascii_digit()))
    {
        Some(c) => Err(ApiKeyValidationError::InvalidCharacter(c)),
        None => Ok(()),
    }
}

/// The issuer id goes verbatim into the `iss` claim
pub fn validate_issuer_id(issuer_id: &str) -> Result<(), ApiKeyValidationError> {
    if issuer_id.is_empty() {
        return Err(ApiKeyValidationError::EmptyIssuerId);
    }
    if issuer_id.chars().any(char::is_whitespace) {
        return Err(ApiKeyValidationError::IssuerIdWhitespace);
    }
    Ok(())
}
