//! Shared response envelope types for API handlers.
//!
//! Single entities and unpaginated collections use the `{ "data": ... }`
//! envelope. Paginated listings return
//! [`Page`](folio_core::pagination::Page) directly, which carries its own
//! metadata.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Body of a like endpoint: the item's new total.
#[derive(Debug, Serialize)]
pub struct LikeCount {
    pub likes: i64,
}
