//! Pagination utilities for cinedb-browse
//!
//! Catalog pages come in a fixed set of sizes; relation previews always use
//! [`PREVIEW_PAGE_SIZE`].

use cinedb_common::{Error, Result};

/// Page sizes offered by the catalog listing
pub const PAGE_SIZES: [usize; 4] = [10, 25, 50, 100];

/// Page size when none is requested
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page size of raw relation previews
pub const PREVIEW_PAGE_SIZE: usize = 20;

/// Pagination metadata calculated from total results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Current page number (1-indexed)
    pub page: usize,
    /// Total number of pages, at least 1
    pub total_pages: usize,
    pub page_size: usize,
    /// Start of the page slice (inclusive)
    pub offset: usize,
    /// End of the page slice (exclusive)
    pub end: usize,
}

impl Pagination {
    /// The items of the current page
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.offset.min(items.len())..self.end.min(items.len())]
    }
}

/// Reject page sizes outside [`PAGE_SIZES`]
pub fn validate_page_size(page_size: usize) -> Result<usize> {
    if PAGE_SIZES.contains(&page_size) {
        Ok(page_size)
    } else {
        Err(Error::InvalidInput(format!(
            "page_size must be one of {:?}, got {}",
            PAGE_SIZES, page_size
        )))
    }
}

/// Calculate pagination metadata from total results and requested page
///
/// The page is clamped into `[1, total_pages]`; there is always at least one
/// page, even for an empty result.
///
/// # Examples
/// ```
/// use cinedb_browse::pagination::calculate_pagination;
///
/// // 25 results at 10 per page = 3 pages (10 + 10 + 5)
/// let p = calculate_pagination(25, 3, 10);
/// assert_eq!(p.total_pages, 3);
/// assert_eq!((p.offset, p.end), (20, 25));
///
/// // Requesting out-of-bounds page gets clamped
/// let p = calculate_pagination(25, 4, 10);
/// assert_eq!(p.page, 3);
/// ```
pub fn calculate_pagination(total_results: usize, requested_page: i64, page_size: usize) -> Pagination {
    let page_size = page_size.max(1);
    let total_pages = total_results.div_ceil(page_size).max(1);
    let page = requested_page.clamp(1, total_pages as i64) as usize;
    let offset = (page - 1) * page_size;
    let end = (page * page_size).min(total_results);

    Pagination {
        page,
        total_pages,
        page_size,
        offset,
        end,
    }
}
