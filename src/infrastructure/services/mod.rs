//! Client services built on the transport and token seams

mod api_client;
mod asc_service;
mod batch_executor;
mod paged_loader;

pub use api_client::ApiClient;
pub use asc_service::AscService;
pub use batch_executor::BatchExecutor;
pub use paged_loader::{PagedLoader, PREFETCH_THRESHOLD};
