use std::sync::Arc;

use parking_lot::Mutex;

use crate::client::PageClient;
use crate::domain::model::Page;
use crate::error::{SelectionError, SelectionResult};
use crate::selection::GenerationCounter;

/// Convert a pager offset into a 1-based page number: `floor(first / rows) + 1`.
pub fn compute_page_from_offset(first: u64, rows: u64) -> SelectionResult<u64> {
    if rows == 0 {
        return Err(SelectionError::InvalidRows(rows));
    }
    Ok(first / rows + 1)
}

/// What the pager is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub current_page: u64,
    /// Offset of the first displayed row.
    pub first: u64,
    pub rows: u64,
    /// Last collection size reported by the server, once any page has loaded.
    pub total_count: Option<u64>,
}

impl PaginationState {
    pub fn total_pages(&self) -> Option<u64> {
        self.total_count
            .map(|total| total.div_ceil(self.rows.max(1)))
    }
}

/// Tracks the displayed page and loads pages on navigation.
///
/// Independent of the selection set; it only shares the [`PageClient`].
pub struct PaginationController {
    client: Arc<dyn PageClient>,
    state: Mutex<PaginationState>,
    navigations: GenerationCounter,
}

impl PaginationController {
    pub fn new(client: Arc<dyn PageClient>, rows: u64) -> Self {
        Self {
            client,
            state: Mutex::new(PaginationState {
                current_page: 1,
                first: 0,
                rows: rows.max(1),
                total_count: None,
            }),
            navigations: GenerationCounter::new(),
        }
    }

    pub fn state(&self) -> PaginationState {
        *self.state.lock()
    }

    pub fn current_page(&self) -> u64 {
        self.state.lock().current_page
    }

    pub fn total_pages(&self) -> Option<u64> {
        self.state.lock().total_pages()
    }

    /// Load `requested_page` and make it current.
    ///
    /// When navigations overlap, only the most recently started one updates
    /// the state; every caller still receives its own page.
    pub async fn go_to_page(&self, requested_page: u64) -> SelectionResult<Page> {
        let rows = self.state.lock().rows;
        self.load(requested_page, rows).await
    }

    /// Navigate by pager offset, as reported by a `(first, rows)` page-change event.
    pub async fn navigate(&self, first: u64, rows: u64) -> SelectionResult<Page> {
        let page_number = compute_page_from_offset(first, rows)?;
        self.load(page_number, rows).await
    }

    async fn load(&self, page_number: u64, rows: u64) -> SelectionResult<Page> {
        if page_number == 0 {
            return Err(SelectionError::InvalidPage(page_number));
        }
        let token = self.navigations.advance();

        let page = match self.client.fetch_page(page_number).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(page = page_number, error = %e, "page navigation failed");
                return Err(e.into());
            }
        };

        let mut state = self.state.lock();
        if self.navigations.is_current(token) {
            state.current_page = page_number;
            state.rows = rows;
            state.first = (page_number - 1).saturating_mul(rows);
            state.total_count = Some(page.total_count);
        } else {
            tracing::debug!(page = page_number, "newer navigation in progress; state unchanged");
        }
        Ok(page)
    }
}
