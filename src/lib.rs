//! asc-kit
//!
//! A typed client for the App Store Connect API:
//! - ES256 token signing from a persisted registry of API keys
//! - Typed endpoint descriptors with filters and cursor pagination
//! - Concurrent batches with per-request failure reporting
//! - Composite operations for apps, builds, testers and bundle ids

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::AscError;
pub use infrastructure::services::{ApiClient, AscService};
