//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope; paginated lists add
//! a `pagination` object. Use these instead of ad-hoc `json!` blocks to
//! get compile-time type safety and consistent serialization.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Standard `{ "message": ... }` envelope for delete confirmations.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// `{ "data": [...], "pagination": {...} }` envelope for paginated lists.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

/// Pagination metadata. `total_pages = ceil(total / limit)`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        Self {
            page,
            limit,
            total,
            total_pages: cradle_core::pagination::total_pages(total, limit),
        }
    }
}
