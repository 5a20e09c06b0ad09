//! Response decoding rules

use serde::de::DeserializeOwned;

use crate::domain::model::DataWrapper;
use crate::domain::AscError;

/// How the body of a successful response turns into the requested type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeRule {
    /// Decode as `T`; on failure retry as `{ "data": T }`
    DirectThenEnveloped,
    /// Decode as `{ "data": T }`
    Enveloped,
    /// Decode as `T`
    Direct,
}

impl DecodeRule {
    /// Decode `body`; an empty body is read as `{}`
    pub fn decode<T: DeserializeOwned>(&self, body: &[u8]) -> Result<T, AscError> {
        let body = if body.iter().all(u8::is_ascii_whitespace) {
            b"{}".as_slice()
        } else {
            body
        };

        match self {
            Self::Direct => serde_json::from_slice(body).map_err(|e| AscError::decode(e.to_string())),
            Self::Enveloped => serde_json::from_slice::<DataWrapper<T>>(body)
                .map(|wrapper| wrapper.data)
                .map_err(|e| AscError::decode(e.to_string())),
            Self::DirectThenEnveloped => match serde_json::from_slice::<T>(body) {
                Ok(value) => Ok(value),
                Err(direct) => serde_json::from_slice::<DataWrapper<T>>(body)
                    .map(|wrapper| wrapper.data)
                    .map_err(|enveloped| {
                        AscError::decode(format!(
                            "direct decoding failed ({}); enveloped decoding failed ({})",
                            direct, enveloped
                        ))
                    }),
            },
        }
    }
}
