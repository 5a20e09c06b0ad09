//! Endpoint descriptors
//!
//! An endpoint is an immutable description of one request plus the rule
//! that decodes its response. Transport and authorization are applied by
//! the client that executes it.

mod decode;
pub mod document;
mod generic;
mod request;
mod resource;

pub use decode::DecodeRule;
pub use generic::{GenericEndpoint, GenericOperation};
pub use request::{
    list_query, page_limit, HttpMethod, RequestSpec, DEFAULT_HOST, DEFAULT_LIMIT, MAX_LIMIT,
    REQUEST_TIMEOUT,
};
pub use resource::ResourceEndpoint;

use std::fmt::Debug;

use serde::de::DeserializeOwned;

use crate::domain::AscError;

/// A request shape that can describe itself and decode its response
pub trait Endpoint: Debug + Send + Sync {
    /// Build the transport-neutral request
    fn describe(&self) -> RequestSpec;

    fn decode_rule(&self) -> DecodeRule;

    fn decode<T: DeserializeOwned>(&self, body: &[u8]) -> Result<T, AscError>
    where
        Self: Sized,
    {
        self.decode_rule().decode(body)
    }
}
