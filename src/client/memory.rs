use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};

use crate::domain::model::{Item, Page};
use crate::error::FetchError;

use super::PageClient;

/// In-process [`PageClient`] over a fixed collection.
///
/// Supports injected per-page failures, a per-request delay, and counters for
/// issued and concurrently in-flight requests. The collection can be replaced
/// between calls to model a remote that mutates.
pub struct InMemoryPageClient {
    items: RwLock<Vec<Item>>,
    page_size: u64,
    failures: Mutex<HashMap<u64, FetchError>>,
    delay: Option<Duration>,
    requests: Mutex<Vec<u64>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl InMemoryPageClient {
    pub fn new(items: Vec<Item>, page_size: u64) -> Self {
        Self {
            items: RwLock::new(items),
            page_size: page_size.max(1),
            failures: Mutex::new(HashMap::new()),
            delay: None,
            requests: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Collection of `count` items with ids `1..=count`.
    pub fn with_sequential_ids(count: u64, page_size: u64) -> Self {
        Self::new((1..=count).map(Item::with_id).collect(), page_size)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Make every request for `page_number` fail with `error`.
    pub fn fail_page(&self, page_number: u64, error: FetchError) {
        self.failures.lock().insert(page_number, error);
    }

    pub fn clear_failures(&self) {
        self.failures.lock().clear();
    }

    pub fn replace_items(&self, items: Vec<Item>) {
        *self.items.write() = items;
    }

    /// Pages requested so far, in request order.
    pub fn requested_pages(&self) -> Vec<u64> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Highest number of requests observed in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn build_page(&self, page_number: u64) -> Page {
        let items = self.items.read();
        let start = usize::try_from(page_number.saturating_sub(1).saturating_mul(self.page_size))
            .unwrap_or(usize::MAX)
            .min(items.len());
        let end = start
            .saturating_add(usize::try_from(self.page_size).unwrap_or(usize::MAX))
            .min(items.len());
        Page {
            items: items[start..end].to_vec(),
            page_number,
            page_size: self.page_size,
            total_count: items.len() as u64,
        }
    }
}

struct InFlightGuard<'a>(&'a AtomicUsize);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl PageClient for InMemoryPageClient {
    async fn fetch_page(&self, page_number: u64) -> Result<Page, FetchError> {
        self.requests.lock().push(page_number);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlightGuard(&self.in_flight);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(err) = self.failures.lock().get(&page_number).cloned() {
            return Err(err);
        }

        Ok(self.build_page(page_number))
    }
}
