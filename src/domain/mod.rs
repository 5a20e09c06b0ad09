//! Domain layer - resource models, request descriptors and errors

pub mod api_key;
pub mod batch;
pub mod endpoint;
pub mod error;
pub mod filter;
pub mod model;

pub use api_key::{ApiKey, ApiKeyId, ApiKeyRepository, KeySource, TokenProvider};
pub use batch::BatchResult;
pub use endpoint::{DecodeRule, Endpoint, GenericEndpoint, RequestSpec, ResourceEndpoint};
pub use error::AscError;
pub use filter::{Filter, FilterKey};
pub use model::{EmptyResponse, IdentifiableModel, Model, PageableModel};
