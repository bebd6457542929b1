//! Shared response envelope types for API handlers.
//!
//! Single resources are wrapped in a `{ "data": ... }` envelope. Paginated
//! listings serialize [`stencil_core::pagination::Page`] directly, which
//! already carries `data` next to its totals.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: template }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
