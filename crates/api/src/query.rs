//! Shared query parameter types for API handlers.

use serde::Deserialize;
use stencil_core::pagination::PageRequest;

/// Pagination parameters (`?page=&limit=`), one-based.
///
/// Values are clamped by [`PageRequest::new`], so any integer is accepted.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl From<PaginationParams> for PageRequest {
    fn from(params: PaginationParams) -> Self {
        PageRequest::new(params.page, params.limit)
    }
}
