use thiserror::Error;

/// Failure of a single page request.
///
/// Every variant is scoped to one page: the aggregator records the page as
/// failed and keeps going.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout")]
    Timeout,

    #[error("HTTP error ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Coarse classification of a [`FetchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchErrorKind {
    /// Transport failure, timeout, or non-success status.
    Network,
    /// Body could not be decoded into a page.
    Parse,
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Network(_) | FetchError::Timeout | FetchError::Status { .. } => {
                FetchErrorKind::Network
            }
            FetchError::Parse(_) => FetchErrorKind::Parse,
        }
    }

    pub fn is_network(&self) -> bool {
        self.kind() == FetchErrorKind::Network
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Parse(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_decode() {
            FetchError::Parse(e.to_string())
        } else {
            FetchError::Network(e.to_string())
        }
    }
}
