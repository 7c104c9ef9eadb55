//! # pagesel — bulk selection over a paginated remote collection
//!
//! `pagesel` lets a caller select the first N records of a large remote
//! collection that is only reachable through a fixed-page-size read API,
//! without ever holding the whole collection in memory:
//!
//! - **Planning**: a desired count becomes a deterministic list of
//!   `(page, take)` instructions ([`plan`]).
//! - **Aggregation**: plans run through a [`PageClient`] with bounded
//!   concurrency; failed pages are reported, not fatal, and results of
//!   superseded requests are dropped ([`SelectionAggregator`]).
//! - **Selection set**: one lock-guarded id set shared by bulk aggregation
//!   and manual row toggles ([`SelectionStore`]).
//! - **Pagination**: displayed-page tracking driven by pager offsets
//!   ([`PaginationController`]).
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pagesel::{SelectionConfig, SelectionSession};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), pagesel::SelectionError> {
//!     let session = SelectionSession::builder(SelectionConfig::from_env()?).build()?;
//!     let page = session.on_page_navigate(0, 12).await?;
//!     println!("showing {} records", page.len());
//!
//!     let result = session.request_bulk_selection(25).await?;
//!     if result.is_partial() {
//!         println!("{} pages could not be loaded", result.failed_pages.len());
//!     }
//!     if let Some(first) = page.items.first() {
//!         session.toggle_row(first.id);
//!     }
//!     println!("{} selected", session.selection_len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod pagination;
pub mod selection;

pub use crate::api::{SelectionSession, SelectionSessionBuilder};
pub use crate::client::{HttpPageClient, InMemoryPageClient, PageClient};
pub use crate::config::{HttpPoolConfig, SelectionConfig};
pub use crate::domain::model::{AggregationResult, Item, Page, Plan, PlanStep};
pub use crate::error::{
    FetchError, FetchErrorKind, FetchResult, SelectionError, SelectionResult,
};
pub use crate::pagination::{compute_page_from_offset, PaginationController, PaginationState};
pub use crate::selection::{
    plan, plan_within, GenerationCounter, SelectionAggregator, SelectionStore,
};
