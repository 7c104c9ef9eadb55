//! Bulk selection: planning, the shared selection set, and plan execution.
//!
//! - [`plan`] / [`plan_within`] — desired count to page instructions.
//! - [`SelectionStore`] — the authoritative id set.
//! - [`SelectionAggregator`] — runs a plan through a [`PageClient`](crate::client::PageClient)
//!   with bounded concurrency and merges the result.
//! - [`GenerationCounter`] — tokens used to drop results of superseded plans.

mod aggregator;
mod generation;
mod planner;
mod store;

pub use aggregator::SelectionAggregator;
pub use generation::GenerationCounter;
pub use planner::{plan, plan_within};
pub use store::SelectionStore;
