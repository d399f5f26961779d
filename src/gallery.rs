//! Gallery controller: paging, query and loading state
//!
//! The controller never performs I/O itself in its `begin_*`/`complete` form:
//! `begin_*` hands out a ticketed `PageRequest`, the caller fetches it and
//! feeds the result back through `complete`. Only the newest ticket is
//! applied, so a slow response for an abandoned search is dropped.
//!
//! `search`, `load_more` and `initial_load` wrap the same cycle around a
//! `Catalog` for callers that can simply await.

use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::types::Artwork;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    LoadingFirstPage,
    LoadingMore,
}

/// How a fetched page merges into `items`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Merge {
    Replace,
    Append,
}

/// A page fetch handed out by the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub ticket: u64,
    pub page: u32,
    pub query: String,
    pub merge: Merge,
}

/// What `complete` did with a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Replaced { count: usize },
    Appended { count: usize },
    /// Generic alert raised, items untouched
    Failed,
    /// Response for a request that is no longer current, ignored
    Stale,
}

#[derive(Debug)]
pub struct GalleryController {
    items: Vec<Artwork>,
    current_page: u32,
    query: String,
    phase: LoadPhase,
    selected: Option<Artwork>,
    in_flight: Option<u64>,
    next_ticket: u64,
    alert: Option<&'static str>,
}

impl Default for GalleryController {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current_page: 1,
            query: String::new(),
            phase: LoadPhase::Idle,
            selected: None,
            in_flight: None,
            next_ticket: 0,
            alert: None,
        }
    }
}

impl GalleryController {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Request cycle
    // ------------------------------------------------------------------

    /// Startup load: the plain listing, page 1
    pub fn begin_initial_load(&mut self) -> PageRequest {
        self.begin_search("")
    }

    /// Switch to `query` and request its first page. Supersedes any
    /// request already in flight.
    pub fn begin_search(&mut self, query: &str) -> PageRequest {
        self.query = query.to_string();
        self.phase = LoadPhase::LoadingFirstPage;
        info!(query = %self.query, "Searching catalog");
        self.issue(1, Merge::Replace)
    }

    /// Request the next page of the active query. `None` while any
    /// request is in flight; the call is dropped, not queued.
    pub fn begin_load_more(&mut self) -> Option<PageRequest> {
        if self.is_loading() {
            debug!(phase = ?self.phase, "Load more suppressed, request in flight");
            return None;
        }
        self.phase = LoadPhase::LoadingMore;
        let page = self.current_page + 1;
        info!(page, query = %self.query, "Loading more artworks");
        Some(self.issue(page, Merge::Append))
    }

    /// Apply the outcome of `request`
    pub fn complete(&mut self, request: &PageRequest, result: Result<Vec<Artwork>, CatalogError>) -> Completion {
        if self.in_flight != Some(request.ticket) {
            debug!(ticket = request.ticket, page = request.page, query = %request.query, "Discarding stale response");
            return Completion::Stale;
        }
        self.in_flight = None;
        self.phase = LoadPhase::Idle;

        match result {
            Ok(page) => {
                let count = page.len();
                self.current_page = request.page;
                match request.merge {
                    Merge::Replace => {
                        self.items = page;
                        info!(count, query = %request.query, "Loaded first page");
                        Completion::Replaced { count }
                    }
                    Merge::Append => {
                        self.items.extend(page);
                        info!(count, page = request.page, total = self.items.len(), "Appended page");
                        Completion::Appended { count }
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, page = request.page, query = %request.query, "Failed to load artworks");
                self.alert = Some(e.user_message());
                Completion::Failed
            }
        }
    }

    fn issue(&mut self, page: u32, merge: Merge) -> PageRequest {
        self.next_ticket += 1;
        self.in_flight = Some(self.next_ticket);
        PageRequest {
            ticket: self.next_ticket,
            page,
            query: self.query.clone(),
            merge,
        }
    }

    // ------------------------------------------------------------------
    // Awaitable operations
    // ------------------------------------------------------------------

    pub async fn initial_load<C: Catalog>(&mut self, catalog: &C) -> Completion {
        self.search(catalog, "").await
    }

    pub async fn search<C: Catalog>(&mut self, catalog: &C, query: &str) -> Completion {
        let request = self.begin_search(query);
        let result = catalog.fetch_page(request.page, &request.query).await;
        self.complete(&request, result)
    }

    /// `None` when suppressed by an in-flight request
    pub async fn load_more<C: Catalog>(&mut self, catalog: &C) -> Option<Completion> {
        let request = self.begin_load_more()?;
        let result = catalog.fetch_page(request.page, &request.query).await;
        Some(self.complete(&request, result))
    }

    // ------------------------------------------------------------------
    // Detail selection
    // ------------------------------------------------------------------

    pub fn open_detail(&mut self, artwork: Artwork) {
        self.selected = Some(artwork);
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&Artwork> {
        self.selected.as_ref()
    }

    // ------------------------------------------------------------------
    // View data
    // ------------------------------------------------------------------

    pub fn items(&self) -> &[Artwork] {
        &self.items
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase != LoadPhase::Idle
    }

    /// Pending alert text; returned once per failure
    pub fn take_alert(&mut self) -> Option<&'static str> {
        self.alert.take()
    }
}
