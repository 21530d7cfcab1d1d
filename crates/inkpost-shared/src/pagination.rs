//! Feed pagination.
//!
//! The window always shows the first and last page, up to three interior
//! pages around the current one, and an ellipsis wherever pages are skipped.
//! Near either edge the window is widened to keep three interior numbers
//! visible instead of centering on the current page.

use serde::{Deserialize, Serialize};

/// One entry of the rendered page navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "page", rename_all = "camelCase")]
pub enum PageMarker {
    Page(u32),
    Ellipsis,
}

/// Number of pages needed for `total_items`, never less than one.
pub fn total_pages_for(total_items: u64, page_size: u32) -> u32 {
    if page_size == 0 || total_items == 0 {
        return 1;
    }
    let pages = total_items.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX).max(1)
}

/// Compute the page markers for `current` out of `total` pages.
///
/// `total` values below one are treated as one, and `current` is clamped
/// into `1..=total`.
pub fn compute_page_window(current: u32, total: u32) -> Vec<PageMarker> {
    let total = total.max(1);
    if total == 1 {
        return vec![PageMarker::Page(1)];
    }
    let current = current.clamp(1, total);

    let mut start = current.saturating_sub(1).max(1);
    let mut end = current.saturating_add(1).min(total);

    if current <= 2 {
        end = total.min(3);
    }
    if current >= total - 1 {
        start = total.saturating_sub(2).max(1);
    }

    let mut markers = Vec::with_capacity(7);
    markers.push(PageMarker::Page(1));

    if start > 2 {
        markers.push(PageMarker::Ellipsis);
    }

    markers.extend(
        (start..=end)
            .filter(|&page| page != 1 && page != total)
            .map(PageMarker::Page),
    );

    if end < total - 1 {
        markers.push(PageMarker::Ellipsis);
    }

    markers.push(PageMarker::Page(total));
    markers
}

/// Current position within a paginated feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    current_page: u32,
    page_size: u32,
    total_pages: u32,
}

impl PaginationState {
    /// Start on page one of a single-page feed. A zero `page_size` is
    /// bumped to one.
    pub fn new(page_size: u32) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            total_pages: 1,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Whether the navigation should be rendered at all.
    pub fn is_visible(&self) -> bool {
        self.total_pages > 1
    }

    /// Recompute the page count from a reported item total. The current
    /// page is pulled back inside the new range if it fell outside.
    pub fn set_total_items(&mut self, total_items: Option<u64>) {
        self.set_total_pages(total_pages_for(total_items.unwrap_or(0), self.page_size));
    }

    pub fn set_total_pages(&mut self, total_pages: u32) {
        self.total_pages = total_pages.max(1);
        self.current_page = self.current_page.clamp(1, self.total_pages);
    }

    /// Move to `requested` if it is a valid page. Returns whether the
    /// current page changed; out-of-range requests are ignored.
    pub fn handle_page_change(&mut self, requested: u32) -> bool {
        if requested < 1 || requested > self.total_pages {
            return false;
        }
        let changed = requested != self.current_page;
        self.current_page = requested;
        changed
    }

    /// Back to the first page, e.g. after the search query changed.
    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    pub fn window(&self) -> Vec<PageMarker> {
        compute_page_window(self.current_page, self.total_pages)
    }
}
