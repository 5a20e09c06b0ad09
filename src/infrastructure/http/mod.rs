//! HTTP transport

mod client;

pub use client::{HttpRequest, HttpTransport, ReqwestTransport};

#[cfg(test)]
pub use client::mock;
