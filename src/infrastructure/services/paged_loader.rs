//! Cursor-following collection loader

use tracing::{debug, warn};

use super::ApiClient;
use crate::domain::endpoint::GenericEndpoint;
use crate::domain::filter::Filter;
use crate::domain::model::{Model, PageableModel};
use crate::domain::AscError;

/// Number of items from the end at which a threshold load fetches ahead
pub const PREFETCH_THRESHOLD: usize = 5;

/// Loads a collection page by page following `links.next`
///
/// With no caller limit the loader keeps going until every item is loaded.
/// With a limit, it loads one page of that size and only fetches further
/// pages on explicit request.
#[derive(Debug)]
pub struct PagedLoader<M: Model> {
    client: ApiClient,
    filters: Vec<Filter>,
    limit: Option<u32>,
    items: Vec<M>,
    last_page: Option<PageableModel<M>>,
    pages_loaded: usize,
}

impl<M: Model> PagedLoader<M> {
    pub fn new(client: ApiClient, filters: Vec<Filter>, limit: Option<u32>) -> Self {
        Self {
            client,
            filters,
            limit,
            items: Vec::new(),
            last_page: None,
            pages_loaded: 0,
        }
    }

    pub fn items(&self) -> &[M] {
        &self.items
    }

    pub fn into_items(self) -> Vec<M> {
        self.items
    }

    pub fn last_page(&self) -> Option<&PageableModel<M>> {
        self.last_page.as_ref()
    }

    pub fn pages_loaded(&self) -> usize {
        self.pages_loaded
    }

    /// Whether the server reports items beyond those loaded
    pub fn has_more_pages(&self) -> bool {
        match &self.last_page {
            None => true,
            Some(page) => {
                page.total_count() as usize > self.items.len() && page.next_url().is_some()
            }
        }
    }

    /// Whether `load_all` would fetch another page
    pub fn can_load_more(&self) -> bool {
        match &self.last_page {
            None => true,
            Some(_) => self.limit.is_none() && self.has_more_pages(),
        }
    }

    /// Fetch the next page and append its items; returns how many were added
    pub async fn load_next_page(&mut self) -> Result<usize, AscError> {
        let endpoint = match self.last_page.as_ref().and_then(|page| page.next_url()) {
            Some(next) => GenericEndpoint::<M>::url(next),
            None if self.last_page.is_none() => {
                GenericEndpoint::<M>::list(self.filters.clone(), self.limit)
            }
            None => return Ok(0),
        };

        let page: PageableModel<M> = self.client.request(&endpoint).await?;
        let added = page.data.len();

        self.pages_loaded += 1;
        debug!(
            "Loaded page {} of {}: {} items, {} of {} total",
            self.pages_loaded,
            M::resource_type(),
            added,
            self.items.len() + added,
            page.total_count()
        );

        self.items.extend(page.data.iter().cloned());
        self.last_page = Some(page);

        if added == 0 && self.has_more_pages() {
            warn!(
                "Server returned an empty page of {} while reporting more items; stopping",
                M::resource_type()
            );
            if let Some(page) = self.last_page.as_mut() {
                page.links.next = None;
            }
        }

        Ok(added)
    }

    /// Keep loading while `can_load_more` holds
    pub async fn load_all(mut self) -> Result<Vec<M>, AscError> {
        while self.can_load_more() {
            self.load_next_page().await?;
        }
        Ok(self.items)
    }

    /// Fetch the next page when `current` is within the last
    /// `PREFETCH_THRESHOLD` loaded items, or when nothing is loaded yet.
    ///
    /// Returns whether a page was fetched.
    pub async fn load_more_if_needed(&mut self, current: Option<usize>) -> Result<bool, AscError> {
        if !self.has_more_pages() {
            return Ok(false);
        }

        let near_end = match current {
            None => true,
            Some(index) => index.saturating_add(PREFETCH_THRESHOLD) >= self.items.len(),
        };

        if !near_end {
            return Ok(false);
        }

        self.load_next_page().await?;
        Ok(true)
    }
}
