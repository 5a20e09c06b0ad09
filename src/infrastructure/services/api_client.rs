//! Executes endpoint descriptors over an HTTP transport

use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::api_key::TokenProvider;
use crate::domain::endpoint::{Endpoint, RequestSpec};
use crate::domain::AscError;
use crate::infrastructure::http::{HttpRequest, HttpTransport};

/// Authorized, single-request execution of endpoints
#[derive(Debug, Clone)]
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
    tokens: Arc<dyn TokenProvider>,
    base_url: Option<Url>,
    key_id: Option<String>,
    timeout: Option<Duration>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn HttpTransport>, tokens: Arc<dyn TokenProvider>) -> Self {
        Self {
            transport,
            tokens,
            base_url: None,
            key_id: None,
            timeout: None,
        }
    }

    /// Send relative paths to `base_url` instead of the descriptor's host
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, AscError> {
        let url = Url::parse(base_url).map_err(|e| {
            AscError::configuration(format!("Invalid base URL '{}': {}", base_url, e))
        })?;
        self.base_url = Some(url);
        Ok(self)
    }

    /// Sign with this registered key instead of the active one
    pub fn with_key_id(mut self, key_id: Option<String>) -> Self {
        self.key_id = key_id;
        self
    }

    /// Override the per-request timeout of every descriptor
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn key_id(&self) -> Option<&str> {
        self.key_id.as_deref()
    }

    /// Resolve a descriptor into an absolute URL
    pub fn resolve_url(&self, spec: &RequestSpec) -> Result<Url, AscError> {
        if let Some(absolute) = &spec.url {
            return Url::parse(absolute)
                .map_err(|e| AscError::invalid_input(format!("Invalid URL '{}': {}", absolute, e)));
        }

        let mut url = match &self.base_url {
            Some(base) => base.clone(),
            None => {
                let authority = match spec.port {
                    Some(port) => format!("{}:{}", spec.host, port),
                    None => spec.host.clone(),
                };
                Url::parse(&format!("https://{}", authority)).map_err(|e| {
                    AscError::invalid_input(format!("Invalid host '{}': {}", spec.host, e))
                })?
            }
        };

        url.set_path(&spec.path);
        if !spec.query.is_empty() {
            url.query_pairs_mut().extend_pairs(spec.query.iter());
        }

        Ok(url)
    }

    /// Turn a descriptor into a transport request, fetching a token when needed
    pub async fn build_request(&self, spec: RequestSpec) -> Result<HttpRequest, AscError> {
        let url = self.resolve_url(&spec)?;

        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if spec.should_authorize {
            let token = self.tokens.create_token(self.key_id.as_deref()).await?;
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }

        Ok(HttpRequest {
            method: spec.method,
            url,
            headers,
            body: spec.body,
            timeout: self.timeout.unwrap_or(spec.timeout),
        })
    }

    /// Execute one endpoint and decode the response per its rule
    pub async fn request<E, T>(&self, endpoint: &E) -> Result<T, AscError>
    where
        E: Endpoint,
        T: DeserializeOwned,
    {
        let request = self.build_request(endpoint.describe()).await?;
        debug!("Sending {} {}", request.method, request.url);

        let body = self.transport.send(request).await?;
        endpoint.decode(&body)
    }
}
