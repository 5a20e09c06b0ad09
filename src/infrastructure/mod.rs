//! Infrastructure layer - External service implementations

pub mod api_key;
pub mod auth;
pub mod http;
pub mod logging;
pub mod services;
