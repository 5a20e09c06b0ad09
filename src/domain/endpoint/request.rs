//! Transport-neutral description of one HTTP request

use std::fmt;
use std::time::Duration;

use serde_json::Value;

use crate::domain::filter::Filter;

/// Host every request goes to unless the client overrides the base URL
pub const DEFAULT_HOST: &str = "api.appstoreconnect.apple.com";

/// Page size used when the caller gives no limit
pub const DEFAULT_LIMIT: u32 = 200;

/// Largest page size the server accepts
pub const MAX_LIMIT: u32 = 200;

/// Fixed per-request timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything needed to issue one request
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    /// Absolute URL that replaces host, port, path and query when present
    pub url: Option<String>,
    pub host: String,
    pub port: Option<u16>,
    pub path: String,
    pub method: HttpMethod,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub timeout: Duration,
    pub should_authorize: bool,
}

impl RequestSpec {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            url: None,
            host: DEFAULT_HOST.to_string(),
            port: None,
            path: path.into(),
            method,
            query: Vec::new(),
            body: None,
            timeout: REQUEST_TIMEOUT,
            should_authorize: true,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// A GET of an absolute URL, typically a server-provided `links.next`
    pub fn absolute(url: impl Into<String>) -> Self {
        let mut spec = Self::new(HttpMethod::Get, "");
        spec.url = Some(url.into());
        spec
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Clamp a caller limit to the accepted page size range
pub fn page_limit(limit: Option<u32>) -> u32 {
    limit
        .map(|limit| limit.clamp(1, MAX_LIMIT))
        .unwrap_or(DEFAULT_LIMIT)
}

/// One `filter[key]=value` pair per filter, then the mandatory `limit`
pub fn list_query(filters: &[Filter], limit: Option<u32>) -> Vec<(String, String)> {
    let mut items: Vec<(String, String)> = filters.iter().map(Filter::query_item).collect();
    items.push(("limit".to_string(), page_limit(limit).to_string()));
    items
}
