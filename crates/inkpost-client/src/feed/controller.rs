use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use inkpost_shared::{PageMarker, PaginationState};
use tracing::debug;

use crate::feed::composer::{FeedComposer, FeedOrigin, FeedViewModel};
use crate::feed::source::PostSource;

/// Mutable state of the home feed.
#[derive(Debug, Clone)]
pub struct FeedState {
    pub query: String,
    pub pagination: PaginationState,
    pub view: FeedViewModel,
}

/// Drives the home feed: owns the current query and page, and applies only
/// the newest response when loads overlap.
///
/// Every load takes a ticket from a monotonically increasing counter before
/// it starts fetching. When it finishes, its result is applied only if no
/// newer load has started in the meantime.
pub struct FeedController<P, F> {
    composer: FeedComposer<P, F>,
    generation: AtomicU64,
    state: Mutex<FeedState>,
}

impl<P: PostSource, F: PostSource> FeedController<P, F> {
    pub fn new(composer: FeedComposer<P, F>, page_size: u32) -> Self {
        Self {
            composer,
            generation: AtomicU64::new(0),
            state: Mutex::new(FeedState {
                query: String::new(),
                pagination: PaginationState::new(page_size),
                view: FeedViewModel::empty("", FeedOrigin::Fallback),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FeedState> {
        // FeedState stays consistent across a panicking holder: every write
        // is a plain field assignment.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> FeedState {
        self.lock().clone()
    }

    pub fn view(&self) -> FeedViewModel {
        self.lock().view.clone()
    }

    /// Page navigation for the current view; empty when it should be hidden.
    pub fn page_window(&self) -> Vec<PageMarker> {
        let state = self.lock();
        if state.pagination.is_visible() {
            state.pagination.window()
        } else {
            Vec::new()
        }
    }

    /// Reload the current query and page.
    pub async fn refresh(&self) -> FeedViewModel {
        let (query, page, page_size) = {
            let state = self.lock();
            (
                state.query.clone(),
                state.pagination.current_page(),
                state.pagination.page_size(),
            )
        };
        self.load(query, page, page_size).await
    }

    /// Start a new search from page one. A blank query shows recommended
    /// posts.
    pub async fn search(&self, query: &str) -> FeedViewModel {
        let page_size = {
            let mut state = self.lock();
            state.query = query.trim().to_string();
            state.pagination.reset();
            state.pagination.page_size()
        };
        self.load(query.trim().to_string(), 1, page_size).await
    }

    /// Move to `page`. Out-of-range requests leave everything unchanged and
    /// return the current view without fetching.
    pub async fn go_to_page(&self, page: u32) -> FeedViewModel {
        let (query, page_size) = {
            let mut state = self.lock();
            if !state.pagination.handle_page_change(page) {
                debug!(page, total = state.pagination.total_pages(), "Ignoring page change");
                return state.view.clone();
            }
            (state.query.clone(), state.pagination.page_size())
        };
        self.load(query, page, page_size).await
    }

    /// Fetch `page` and apply it unless a newer load started meanwhile.
    ///
    /// When the response reports fewer pages than `page`, the last page is
    /// fetched instead, so the applied view always lies within its own
    /// `total_pages`.
    async fn load(&self, query: String, mut page: u32, page_size: u32) -> FeedViewModel {
        loop {
            let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

            let view = self.composer.load_feed(&query, page, page_size).await;

            let clamped = {
                let mut state = self.lock();
                if self.generation.load(Ordering::SeqCst) != ticket {
                    debug!(ticket, query = %query, page, "Discarding stale feed response");
                    return state.view.clone();
                }

                state.pagination.set_total_pages(view.total_pages);
                let clamped = state.pagination.current_page();
                if clamped == view.current_page {
                    state.view = view.clone();
                    return view;
                }
                clamped
            };

            debug!(
                requested = page,
                total_pages = view.total_pages,
                "Page is past the end, loading the last page"
            );
            page = clamped;
        }
    }
}
