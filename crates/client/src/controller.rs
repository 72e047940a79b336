//! Client-side listing state machine.
//!
//! Translates user interactions (typing, sort-header clicks, pagination
//! clicks) into listing requests while minimizing redundant traffic:
//!
//! - Search keystrokes restart a debounce timer; only the final value
//!   after a quiet period produces a request. Page and sort changes fetch
//!   immediately.
//! - Results are cached by descriptor. A cache hit renders immediately
//!   while a background refetch of the same descriptor still runs, so the
//!   cache only ever shortens perceived latency.
//! - After each successful primary fetch the next page is prefetched into
//!   the cache; prefetch failures are ignored and prefetch results never
//!   touch view state.
//! - A stale-response guard (monotonic request sequence) discards a
//!   completed fetch whenever a newer primary request has been issued
//!   since. In-flight transports are not aborted, their results are
//!   simply not applied.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use staffdir_core::listing::{ListingQuery, SortDir, SortField, UserPage};
use staffdir_core::user::User;
use tokio::task::JoinHandle;

use crate::api::{ClientError, DirectoryApi};

/// How long a keystroke burst must stay quiet before a request fires.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Fetches listing pages. The controller is transport-agnostic so tests
/// can substitute a deterministic fake for the HTTP client.
#[async_trait]
pub trait ListingTransport: Send + Sync + 'static {
    async fn fetch(&self, query: &ListingQuery) -> Result<UserPage, ClientError>;
}

#[async_trait]
impl ListingTransport for DirectoryApi {
    async fn fetch(&self, query: &ListingQuery) -> Result<UserPage, ClientError> {
        self.list_users(query).await
    }
}

/// View state shared with in-flight fetch tasks.
struct ViewState {
    rows: Vec<User>,
    total_pages: i64,
    loading: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            total_pages: 1,
            loading: false,
        }
    }
}

/// Drives one listing view.
///
/// All methods are called from the UI side; fetches run as spawned tasks
/// that write back through shared state.
pub struct ListingController {
    fetcher: Fetcher,
    query: ListingQuery,
    /// Pending debounce timer; aborted and replaced on every keystroke.
    debounce: Option<JoinHandle<()>>,
}

impl ListingController {
    pub fn new(transport: Arc<dyn ListingTransport>) -> Self {
        Self {
            fetcher: Fetcher {
                transport,
                cache: Arc::new(Mutex::new(HashMap::new())),
                view: Arc::new(Mutex::new(ViewState::default())),
                seq: Arc::new(AtomicU64::new(0)),
            },
            query: ListingQuery::default(),
            debounce: None,
        }
    }

    /// The currently committed descriptor.
    pub fn query(&self) -> &ListingQuery {
        &self.query
    }

    /// Rows currently shown.
    pub fn rows(&self) -> Vec<User> {
        self.fetcher.view().rows.clone()
    }

    pub fn total_pages(&self) -> i64 {
        self.fetcher.view().total_pages
    }

    pub fn is_loading(&self) -> bool {
        self.fetcher.view().loading
    }

    /// Cached result for a descriptor, if any.
    pub fn cached(&self, query: &ListingQuery) -> Option<UserPage> {
        self.fetcher.cache().get(query).cloned()
    }

    /// Issue the initial load for the current descriptor.
    pub fn start(&mut self) {
        self.issue();
    }

    /// Record a search keystroke.
    ///
    /// The descriptor is updated at once (any text change resets to page
    /// 1), but the fetch waits for [`SEARCH_DEBOUNCE`] of quiet; every
    /// keystroke aborts the previous timer, so a burst produces exactly
    /// one request carrying the final text.
    pub fn set_search(&mut self, text: &str) {
        self.query.page = 1;
        self.query.search = text.trim().to_lowercase();

        if let Some(timer) = self.debounce.take() {
            timer.abort();
        }
        let fetcher = self.fetcher.clone();
        let query = self.query.clone();
        self.debounce = Some(tokio::spawn(async move {
            tokio::time::sleep(SEARCH_DEBOUNCE).await;
            // Spawned separately so aborting a later keystroke's timer can
            // never cancel an already-issued request mid-flight.
            tokio::spawn(async move { fetcher.refresh(query).await });
        }));
    }

    /// Sort-header click: the same column toggles direction, a different
    /// column resets to ascending. Either way back to page 1, fetching
    /// immediately (no debounce).
    pub fn sort_by(&mut self, field: SortField) {
        self.query.page = 1;
        if self.query.sort_by == Some(field) {
            self.query.sort_dir = self.query.sort_dir.toggled();
        } else {
            self.query.sort_by = Some(field);
            self.query.sort_dir = SortDir::Asc;
        }
        self.issue();
    }

    /// Advance one page, clamped to the last known page count.
    pub fn next_page(&mut self) {
        let last = self.total_pages();
        let page = (self.query.page + 1).min(last);
        self.set_page(page);
    }

    /// Go back one page, clamped to 1.
    pub fn prev_page(&mut self) {
        let page = (self.query.page - 1).max(1);
        self.set_page(page);
    }

    fn set_page(&mut self, page: i64) {
        if page == self.query.page {
            return;
        }
        self.query.page = page;
        self.issue();
    }

    /// Fetch the current descriptor now.
    fn issue(&self) {
        let fetcher = self.fetcher.clone();
        let query = self.query.clone();
        tokio::spawn(async move { fetcher.refresh(query).await });
    }
}

/// The shared half of the controller: everything an in-flight fetch task
/// needs to write results back.
#[derive(Clone)]
struct Fetcher {
    transport: Arc<dyn ListingTransport>,
    cache: Arc<Mutex<HashMap<ListingQuery, UserPage>>>,
    view: Arc<Mutex<ViewState>>,
    /// Sequence number of the newest primary fetch; completed fetches
    /// apply to view state only while they still match.
    seq: Arc<AtomicU64>,
}

impl Fetcher {
    fn view(&self) -> MutexGuard<'_, ViewState> {
        self.view.lock().expect("view lock poisoned")
    }

    fn cache(&self) -> MutexGuard<'_, HashMap<ListingQuery, UserPage>> {
        self.cache.lock().expect("cache lock poisoned")
    }

    /// Run a primary fetch for `query`.
    async fn refresh(&self, query: ListingQuery) {
        let my_seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;

        // A cache hit renders immediately; the refetch below still runs.
        if let Some(hit) = self.cache().get(&query).cloned() {
            let mut view = self.view();
            view.rows = hit.items;
            view.total_pages = hit.total_pages;
        }
        self.view().loading = true;

        match self.transport.fetch(&query).await {
            Ok(page) => {
                self.cache().insert(query.clone(), page.clone());

                // Last-issued-wins: a superseded response only feeds the
                // cache, never the view.
                if self.seq.load(Ordering::SeqCst) == my_seq {
                    let mut view = self.view();
                    view.rows = page.items.clone();
                    view.total_pages = page.total_pages;
                    view.loading = false;
                }

                if query.page < page.total_pages {
                    self.prefetch(query.with_page(query.page + 1)).await;
                }
            }
            Err(err) => {
                tracing::debug!(error = %err, "listing fetch failed");
                // Keep showing the previous results; just stop the spinner.
                if self.seq.load(Ordering::SeqCst) == my_seq {
                    self.view().loading = false;
                }
            }
        }
    }

    /// Speculatively fetch a page into the cache. Never touches view
    /// state; failures are ignored.
    async fn prefetch(&self, query: ListingQuery) {
        if self.cache().contains_key(&query) {
            return;
        }
        if let Ok(page) = self.transport.fetch(&query).await {
            self.cache().insert(query, page);
        }
    }
}
