//! Page clients — one request per page against the remote collection.
//!
//! [`PageClient`] is the seam the aggregator and the pagination controller
//! share. [`HttpPageClient`] talks to the real endpoint;
//! [`InMemoryPageClient`] serves a fixed collection from memory.

use async_trait::async_trait;

use crate::domain::model::Page;
use crate::error::FetchError;

pub mod http;
pub mod memory;
mod wire;

pub use http::HttpPageClient;
pub use memory::InMemoryPageClient;

#[async_trait]
pub trait PageClient: Send + Sync {
    /// Fetch one page (1-based). Exactly one request per call: no caching, no retry.
    async fn fetch_page(&self, page_number: u64) -> Result<Page, FetchError>;
}
