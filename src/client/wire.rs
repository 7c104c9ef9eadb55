//! JSON body of the paginated endpoint.
//!
//! ```json
//! { "data": [ { "id": 1, ... } ],
//!   "pagination": { "total": 120, "limit": 12, "offset": 0, "total_pages": 10, "current_page": 1 } }
//! ```

use serde::Deserialize;

use crate::domain::model::{Item, Page};
use crate::error::FetchError;

#[derive(Debug, Deserialize)]
pub(crate) struct PageResponse {
    pub data: Vec<Item>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PaginationInfo {
    pub total: u64,
    /// Page size. `offset` and `total_pages` are derivable and ignored.
    pub limit: u64,
    #[serde(default)]
    pub current_page: Option<u64>,
}

impl PageResponse {
    pub(crate) fn into_page(self, requested_page: u64) -> Result<Page, FetchError> {
        let PageResponse { data, pagination } = self;
        if pagination.limit == 0 {
            return Err(FetchError::Parse(
                "pagination.limit must be greater than zero".to_string(),
            ));
        }
        if data.len() as u64 > pagination.limit {
            return Err(FetchError::Parse(format!(
                "page {} holds {} items but limit is {}",
                requested_page,
                data.len(),
                pagination.limit
            )));
        }
        if let Some(current) = pagination.current_page {
            if current != requested_page {
                tracing::debug!(
                    requested = requested_page,
                    reported = current,
                    "server reported a different current_page"
                );
            }
        }
        Ok(Page {
            items: data,
            page_number: requested_page,
            page_size: pagination.limit,
            total_count: pagination.total,
        })
    }
}

pub(crate) fn parse_page(body: &str, requested_page: u64) -> Result<Page, FetchError> {
    let response: PageResponse = serde_json::from_str(body)?;
    response.into_page(requested_page)
}
