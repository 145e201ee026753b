//! Pagination bookkeeping for one window.

use crate::config::PagingConfig;
use crate::store::PageRequest;

/// Tracks the page anchor, total count, edge flags, sort key, and the
/// single-flight guard for one window.
///
/// The cursor never talks to the store. The coordinator asks it for
/// the next [`PageRequest`], performs the fetch, and commits the
/// outcome afterwards; a request that is never committed leaves the
/// cursor untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    base_page_size: u32,
    page_number: u32,
    total_count: usize,
    is_last_page: bool,
    sort_key: String,
    in_flight: bool,
}

impl PageCursor {
    pub fn new(config: &PagingConfig, sort_key: impl Into<String>) -> Self {
        Self {
            base_page_size: config.base_page_size(),
            page_number: 0,
            total_count: 0,
            is_last_page: false,
            sort_key: sort_key.into(),
            in_flight: false,
        }
    }

    /// The request for a fresh initial load: page 0 at triple size.
    pub fn initial_request(&self) -> PageRequest {
        PageRequest {
            page: 0,
            size: self.initial_page_size(),
        }
    }

    /// Compute the next page request in the given direction.
    ///
    /// Returns `None` when the window is already at the corresponding
    /// edge: forward past the last page, or backward from page 0.
    pub fn request_next_page(&self, forward: bool) -> Option<PageRequest> {
        if forward && self.is_last_page {
            return None;
        }
        if !forward && self.page_number == 0 {
            return None;
        }
        let page = if forward {
            self.page_number + 1
        } else {
            self.page_number - 1
        };
        let size = if page == 0 {
            self.initial_page_size()
        } else {
            self.base_page_size
        };
        Some(PageRequest { page, size })
    }

    /// Record a successful initial load.
    ///
    /// Adopts the new sort key, refreshes the total count (the only
    /// point where it is refreshed), and derives the last-page flag.
    /// An empty dataset is immediately both first and last page.
    pub fn commit_initial(
        &mut self,
        sort_key: impl Into<String>,
        request: PageRequest,
        total_count: usize,
        returned_count: usize,
    ) {
        self.sort_key = sort_key.into();
        self.page_number = request.page;
        self.total_count = total_count;
        self.is_last_page =
            returned_count < request.size as usize || returned_count >= total_count;
    }

    /// Record a successful directional load.
    ///
    /// Only a forward commit derives the last-page flag; stepping
    /// backward moves the anchor off the end, so the flag drops and a
    /// later forward evaluation re-derives it.
    pub fn commit(&mut self, forward: bool, request: PageRequest, returned_count: usize) {
        self.page_number = request.page;
        self.is_last_page = forward
            && (returned_count < request.size as usize
                || request.page as usize * request.size as usize + returned_count
                    >= self.total_count);
    }

    /// Reset to the opening state under a (possibly new) sort key.
    /// Used on sort change and on error-triggered refresh.
    pub fn reset(&mut self, sort_key: impl Into<String>) {
        self.sort_key = sort_key.into();
        self.page_number = 0;
        self.total_count = 0;
        self.is_last_page = false;
    }

    /// Try to claim the single-flight guard. Exactly one load may be
    /// outstanding per cursor; a second claim fails until `release`.
    pub fn try_acquire(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        true
    }

    pub fn release(&mut self) {
        self.in_flight = false;
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn sort_key(&self) -> &str {
        &self.sort_key
    }

    /// Derived, never independently settable.
    pub fn is_first_page(&self) -> bool {
        self.page_number == 0
    }

    pub fn is_last_page(&self) -> bool {
        self.is_last_page
    }

    fn initial_page_size(&self) -> u32 {
        self.base_page_size * 3
    }
}
