//! Typed API surface, one module per Qualer resource family.

mod assets;
mod documents;
mod service_orders;

pub use assets::{AssetFilter, AssetsApi};
pub use documents::DocumentsApi;
pub use service_orders::{ServiceOrderFilter, ServiceOrdersApi};

use crate::cursor;
use crate::error::{QualerError, QualerResult};

/// Hard upper bound on page size; requests above it are clamped.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Page size used when the caller does not supply one.
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Pagination parameters accepted by search-style operations.
#[derive(Debug, Clone, Default)]
pub struct PageRequest {
    /// Maximum items per page; clamped to 1..=MAX_PAGE_SIZE.
    pub limit: Option<u32>,
    /// Opaque cursor from a previous page, if resuming.
    pub cursor: Option<String>,
}

/// Reject non-positive identifiers before any network call is made.
pub(crate) fn check_id(name: &str, id: i64) -> QualerResult<i64> {
    if id <= 0 {
        return Err(QualerError::Invalid(format!(
            "{} must be a positive integer, got {}",
            name, id
        )));
    }
    Ok(id)
}

/// Resolve the listing window from pagination parameters: clamp the
/// limit, decode the cursor, and verify the cursor's filter binding.
pub(crate) fn resolve_window(page: &PageRequest, fingerprint: &str) -> QualerResult<(u64, u32)> {
    let limit = page.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let offset = match page.cursor.as_deref() {
        Some(token) => {
            let cursor = cursor::decode(token)?;
            cursor.verify(fingerprint)?;
            cursor.offset
        }
        None => 0,
    };
    Ok((offset, limit))
}

/// Compute the continuation cursor for the next page, if one exists.
///
/// `fetched` is the UNFILTERED remote page size: local post-filtering
/// must never change cursor arithmetic.
pub(crate) fn next_cursor(
    offset: u64,
    fetched: usize,
    limit: u32,
    total_count: Option<u64>,
    fingerprint: &str,
) -> Option<String> {
    let fetched = fetched as u64;
    let has_more = match total_count {
        Some(total) => offset + fetched < total,
        // Without a total hint, a full page means there may be more.
        None => fetched > 0 && fetched == u64::from(limit),
    };
    has_more.then(|| cursor::encode(offset + fetched, fingerprint))
}
