//! Page/limit pagination helpers shared by the API and repository layers.

/// Default number of rows per page.
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

/// Maximum number of rows per page.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Clamp a caller-supplied limit to `1..=MAX_PAGE_LIMIT`, defaulting when
/// absent or non-positive.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    match limit {
        Some(l) if l > MAX_PAGE_LIMIT => MAX_PAGE_LIMIT,
        Some(l) if l >= 1 => l,
        _ => DEFAULT_PAGE_LIMIT,
    }
}

/// Clamp a caller-supplied 1-based page number, defaulting to the first
/// page when absent or non-positive.
pub fn clamp_page(page: Option<i64>) -> i64 {
    match page {
        Some(p) if p >= 1 => p,
        _ => 1,
    }
}

/// SQL OFFSET for a 1-based page.
pub fn page_offset(page: i64, limit: i64) -> i64 {
    (page - 1) * limit
}

/// `ceil(total / limit)`; zero rows yield zero pages.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if total == 0 {
        0
    } else {
        (total + limit - 1) / limit
    }
}
