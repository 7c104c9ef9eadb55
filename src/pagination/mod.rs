//! Displayed-page tracking for the pager.

mod controller;

pub use controller::{compute_page_from_offset, PaginationController, PaginationState};
