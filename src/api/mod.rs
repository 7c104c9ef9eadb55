//! Public API layer — stable entry points for the selection UI.
//!
//! [`SelectionSession`] bundles the selection store, aggregator, and
//! pagination controller behind the calls a table view needs.

mod session;

pub use session::{SelectionSession, SelectionSessionBuilder};
