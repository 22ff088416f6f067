//! Pagination over ordered result sets
//!
//! Pages are 1-indexed. A page outside the result set is simply empty;
//! callers decide whether that is an error.

use std::num::IntErrorKind;

use serde::Deserialize;

/// Items per page for every question listing
pub const QUESTIONS_PER_PAGE: usize = 10;

/// Pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (1-indexed, may be out of range)
    pub page: i64,
    /// Items per page
    pub per_page: usize,
}

impl Pagination {
    /// Pagination with the standard page size.
    pub fn new(page: i64) -> Self {
        Self::with_size(page, QUESTIONS_PER_PAGE)
    }

    /// Pagination with an explicit page size (clamped to at least 1).
    pub fn with_size(page: i64, per_page: usize) -> Self {
        Self {
            page,
            per_page: per_page.max(1),
        }
    }

    /// Offset of the first item, or `None` for pages below 1.
    pub fn offset(&self) -> Option<usize> {
        if self.page < 1 {
            return None;
        }
        usize::try_from(self.page - 1)
            .ok()?
            .checked_mul(self.per_page)
    }

    /// Borrow the items on this page.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        match self.offset() {
            Some(start) if start < items.len() => {
                let end = start.saturating_add(self.per_page).min(items.len());
                &items[start..end]
            }
            _ => &[],
        }
    }

    /// Copy the items on this page into a new vector.
    pub fn paginate<T: Clone>(&self, items: &[T]) -> Vec<T> {
        self.slice(items).to_vec()
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Query parameters for pagination.
///
/// `page` is kept as raw text so that a malformed value falls back to
/// page 1 instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<String>,
}

impl PaginationParams {
    /// Parsed page number, if present and numeric.
    ///
    /// Numbers too large for `i64` saturate, so they stay out of range
    /// instead of falling back to page 1.
    pub fn page_number(&self) -> Option<i64> {
        let raw = self.page.as_deref()?.trim();
        match raw.parse::<i64>() {
            Ok(page) => Some(page),
            Err(err) => match err.kind() {
                IntErrorKind::PosOverflow => Some(i64::MAX),
                IntErrorKind::NegOverflow => Some(i64::MIN),
                _ => None,
            },
        }
    }
}

impl From<PaginationParams> for Pagination {
    fn from(params: PaginationParams) -> Self {
        Self::new(params.page_number().unwrap_or(1))
    }
}
