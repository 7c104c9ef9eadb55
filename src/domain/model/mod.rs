//! Records, pages, plans, and aggregation outcomes.

mod aggregation;
mod item;
mod page;
mod plan;

pub use aggregation::AggregationResult;
pub use item::Item;
pub use page::Page;
pub use plan::{Plan, PlanStep};
