//! Page-number pagination for list endpoints.
//!
//! `page` is 1-based. `page_size` is caller-overridable but clamped to
//! [`MAX_PAGE_SIZE`]; unusable sizes fall back to [`DEFAULT_PAGE_SIZE`]
//! rather than failing the request.

use serde::Serialize;

use crate::error::CoreError;

/// Page size used when the caller does not supply one.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Hard upper bound for caller-supplied page sizes.
pub const MAX_PAGE_SIZE: i64 = 25;

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Parse raw `page` / `page_size` query values.
    pub fn parse(page: Option<&str>, page_size: Option<&str>) -> Result<Self, CoreError> {
        let page = match page.map(str::trim).filter(|p| !p.is_empty()) {
            None => 1,
            Some(raw) => match raw.parse::<i64>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    return Err(CoreError::Validation(format!(
                        "Invalid page '{raw}': must be a positive integer"
                    )))
                }
            },
        };

        let page_size = page_size
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .filter(|n| *n >= 1)
            .map_or(DEFAULT_PAGE_SIZE, |n| n.min(MAX_PAGE_SIZE));

        Ok(Self { page, page_size })
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// Number of pages needed for `count` rows. An empty result still has
    /// one (empty) page.
    pub fn page_count(&self, count: i64) -> i64 {
        if count <= 0 {
            1
        } else {
            (count + self.page_size - 1) / self.page_size
        }
    }

    /// Reject pages past the end of the result set.
    pub fn ensure_in_range(&self, count: i64) -> Result<(), CoreError> {
        if self.page > self.page_count(count) {
            return Err(CoreError::not_found("Page", self.page));
        }
        Ok(())
    }
}

/// A page of results with navigation metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T: Serialize> {
    /// Total number of rows matching the query across all pages.
    pub count: i64,
    /// Next page number, if any.
    pub next: Option<i64>,
    /// Previous page number, if any.
    pub previous: Option<i64>,
    pub results: Vec<T>,
}

impl<T: Serialize> Page<T> {
    pub fn new(request: &PageRequest, count: i64, results: Vec<T>) -> Self {
        let last = request.page_count(count);
        Self {
            count,
            next: (request.page < last).then_some(request.page + 1),
            previous: (request.page > 1).then_some(request.page - 1),
            results,
        }
    }
}
