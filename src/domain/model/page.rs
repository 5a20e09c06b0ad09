//! Paged collection documents

use serde::{Deserialize, Serialize};

/// `{ "data": T }` envelope used by most resource responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataWrapper<T> {
    pub data: T,
}

/// One page of a collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageableModel<M> {
    pub data: Vec<M>,
    pub meta: PagingInformation,
    pub links: PageLinks,
}

impl<M> PageableModel<M> {
    /// Total number of resources matching the request, across all pages
    pub fn total_count(&self) -> u32 {
        self.meta.paging.total
    }

    /// Maximum number of resources on one page
    pub fn limit(&self) -> u32 {
        self.meta.paging.limit
    }

    /// Cursor URL of the next page; `None` on the last page
    pub fn next_url(&self) -> Option<&str> {
        self.links.next.as_deref()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PagingInformation {
    pub paging: Paging,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Paging {
    pub total: u32,
    pub limit: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageLinks {
    /// The link that produced the current document
    #[serde(rename = "self")]
    pub self_link: String,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub first: Option<String>,
}
