//! Page-number pagination
//!
//! Pages are 1-based. A result set with zero rows still has one (empty)
//! page, so page 1 is always addressable; any page past the last one is an
//! error rather than an empty slice.

use serde::Serialize;

use crate::error::DomainError;

/// Upper bound on page size accepted from clients
pub const MAX_PAGE_SIZE: u32 = 100;

/// A requested page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    /// Build a request, clamping the size to `1..=MAX_PAGE_SIZE` and the page to at least 1
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Row offset of the first item on this page
    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }

    /// Number of pages needed for `total` rows (never less than 1)
    pub fn total_pages(&self, total: i64) -> u32 {
        if total <= 0 {
            return 1;
        }
        let size = i64::from(self.page_size);
        u32::try_from((total + size - 1) / size).unwrap_or(u32::MAX)
    }

    /// Reject pages past the end of a result set of `total` rows
    pub fn ensure_within(&self, total: i64) -> Result<u32, DomainError> {
        let total_pages = self.total_pages(total);
        if self.page > total_pages {
            return Err(DomainError::PageNotFound(self.page));
        }
        Ok(total_pages)
    }
}

/// One page of results plus the numbers needed to render a pager
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_num: u32,
    pub page_size: u32,
    pub total_page: u32,
    pub total_count: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_count: i64) -> Self {
        Self {
            items,
            page_num: request.page,
            page_size: request.page_size,
            total_page: request.total_pages(total_count),
            total_count,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page_num < self.total_page
    }

    pub fn has_previous(&self) -> bool {
        self.page_num > 1
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page_num: self.page_num,
            page_size: self.page_size,
            total_page: self.total_page,
            total_count: self.total_count,
        }
    }
}
