//! Domain layer — plain data shared by the client, selection, and pagination layers.
//!
//! Nothing here performs I/O or holds shared state.

pub mod model;

pub use model::{AggregationResult, Item, Page, Plan, PlanStep};
