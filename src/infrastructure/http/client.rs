use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Url;
use std::time::Duration;
use tracing::debug;

use crate::domain::endpoint::HttpMethod;
use crate::domain::AscError;

/// A fully resolved outgoing request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    pub timeout: Duration,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Trait for HTTP transport (for mocking)
///
/// Returns the raw body of a 2xx response; any other status is an
/// `AscError::Http` carrying the response body.
#[async_trait]
pub trait HttpTransport: Send + Sync + std::fmt::Debug {
    async fn send(&self, request: HttpRequest) -> Result<Bytes, AscError>;
}

/// Real HTTP transport using reqwest
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

fn to_reqwest(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<Bytes, AscError> {
        debug!("{} {}", request.method, request.url);

        let mut builder = self
            .client
            .request(to_reqwest(request.method), request.url.clone())
            .timeout(request.timeout);

        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| AscError::transport(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(AscError::http(status.as_u16(), error_body));
        }

        response
            .bytes()
            .await
            .map_err(|e| AscError::transport(format!("Failed to read response: {}", e)))
    }
}
