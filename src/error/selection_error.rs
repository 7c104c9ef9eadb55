//! Selection-level error types.

use thiserror::Error;

use super::FetchError;

/// Selection-level errors
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("Invalid page size: {0} (must be greater than zero)")]
    InvalidPageSize(u64),
    #[error("Invalid page number: {0} (pages are 1-based)")]
    InvalidPage(u64),
    #[error("Invalid rows per page: {0} (must be greater than zero)")]
    InvalidRows(u64),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl SelectionError {
    /// Returns the underlying fetch error, if this error came from a page request.
    pub fn as_fetch(&self) -> Option<&FetchError> {
        match self {
            SelectionError::Fetch(e) => Some(e),
            _ => None,
        }
    }
}
