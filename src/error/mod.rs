//! Error types for bulk selection.
//!
//! - [`FetchError`] — Page-scoped failures raised by a [`PageClient`](crate::client::PageClient).
//! - [`SelectionError`] — Argument, configuration, and delegated fetch errors
//!   surfaced by the planner, pagination controller, and session facade.

pub mod fetch_error;
pub mod selection_error;

pub use fetch_error::{FetchError, FetchErrorKind};
pub use selection_error::SelectionError;

/// Convenience alias for page fetch results.
pub type FetchResult<T> = Result<T, FetchError>;
/// Convenience alias for selection-level results.
pub type SelectionResult<T> = Result<T, SelectionError>;
