//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Pagination query parameters, reusable across all list endpoints.
///
/// Raw values arrive unclamped from the query string; `page()` and `limit()`
/// apply the boundary contract (page >= 1, limit in 1..=MAX_PAGE_SIZE).
#[derive(Debug, Clone, Deserialize)]
pub struct PageRequest {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    DEFAULT_PAGE_NUMBER as i64
}

fn default_limit() -> i64 {
    DEFAULT_PAGE_SIZE as i64
}

impl PageRequest {
    /// Page number clamped to a minimum of 1 (zero/negative become 1)
    pub fn page(&self) -> u64 {
        self.page.max(1) as u64
    }

    /// Page size clamped to 1..=MAX_PAGE_SIZE
    pub fn limit(&self) -> u64 {
        self.limit.clamp(1, MAX_PAGE_SIZE as i64) as u64
    }

    /// Calculate offset for database query
    pub fn offset(&self) -> u64 {
        (self.page() - 1) * self.limit()
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER as i64,
            limit: DEFAULT_PAGE_SIZE as i64,
        }
    }
}

/// Paginated result set with navigation metadata
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> Page<T> {
    /// Wrap a fetched page and its total count with navigation metadata
    pub fn new(items: Vec<T>, total: u64, page: u64, limit: u64) -> Self {
        let total_pages = if limit > 0 { total.div_ceil(limit) } else { 0 };

        Self {
            items,
            total,
            page,
            limit,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Map items to another type, keeping the metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
            has_next: self.has_next,
            has_prev: self.has_prev,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_clamped_to_one() {
        let params = PageRequest { page: 0, limit: 10 };
        assert_eq!(params.page(), 1);

        let params = PageRequest { page: -5, limit: 10 };
        assert_eq!(params.page(), 1);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_limit_capped() {
        let params = PageRequest {
            page: 1,
            limit: 1000,
        };
        assert_eq!(params.limit(), MAX_PAGE_SIZE);

        let params = PageRequest { page: 1, limit: 0 };
        assert_eq!(params.limit(), 1);
    }

    #[test]
    fn test_defaults() {
        let params = PageRequest::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 10);
    }

    #[test]
    fn test_navigation_metadata() {
        let page = Page::new(vec![1, 2, 3], 25, 2, 10);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next);
        assert!(page.has_prev);

        let first = Page::new(vec![1], 25, 1, 10);
        assert!(!first.has_prev);

        let last = Page::new(vec![1], 25, 3, 10);
        assert!(!last.has_next);
    }

    #[test]
    fn test_empty_result() {
        let page: Page<i32> = Page::new(vec![], 0, 1, 10);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next);
        assert!(!page.has_prev);
    }
}
