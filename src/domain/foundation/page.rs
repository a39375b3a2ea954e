//! Paging value objects for listing queries.
//!
//! Listing operations return a `Page` rather than a raw Vec so callers get
//! the total row count alongside the requested slice. An empty page is a
//! normal outcome, never an error.

use serde::{Deserialize, Serialize};

/// A zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Zero-based page index.
    pub page: u32,
    /// Maximum items per page.
    pub size: u32,
}

impl PageRequest {
    /// Creates a page request for the given page index and size.
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    /// First page with the given size.
    pub fn first(size: u32) -> Self {
        Self { page: 0, size }
    }

    /// A request covering the whole result set in one page.
    ///
    /// Used by the restock notification protocol, which snapshots every
    /// subscription for a product before dispatching.
    pub fn unbounded() -> Self {
        Self {
            page: 0,
            size: u32::MAX,
        }
    }

    /// Row offset of the first item on this page.
    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.size)
    }

    /// Row limit for this page.
    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

/// One page of query results together with the total match count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page, in query order.
    pub items: Vec<T>,
    /// Zero-based page index that was requested.
    pub page: u32,
    /// Page size that was requested.
    pub size: u32,
    /// Total matches across all pages.
    pub total: u64,
}

impl<T> Page<T> {
    /// Creates a page from a slice of the result set.
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            page: request.page,
            size: request.size,
            total,
        }
    }

    /// An empty page for the given request.
    pub fn empty(request: PageRequest) -> Self {
        Self {
            items: Vec::new(),
            page: request.page,
            size: request.size,
            total: 0,
        }
    }

    /// Builds a page by slicing an already-filtered, already-ordered set.
    ///
    /// Used by in-memory adapters; database adapters page in SQL.
    pub fn from_full_set(all: Vec<T>, request: PageRequest) -> Self {
        let total = all.len() as u64;
        let items = all
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.size as usize)
            .collect();
        Self::new(items, request, total)
    }

    /// Number of items on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if this page holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_page_times_size() {
        let request = PageRequest::new(3, 25);
        assert_eq!(request.offset(), 75);
        assert_eq!(request.limit(), 25);
    }

    #[test]
    fn unbounded_starts_at_zero_with_max_size() {
        let request = PageRequest::unbounded();
        assert_eq!(request.offset(), 0);
        assert_eq!(request.size, u32::MAX);
    }

    #[test]
    fn unbounded_offset_does_not_overflow() {
        // offset is computed in i64 so page * u32::MAX cannot wrap
        let request = PageRequest::new(2, u32::MAX);
        assert_eq!(request.offset(), 2 * i64::from(u32::MAX));
    }

    #[test]
    fn empty_page_has_no_items_and_zero_total() {
        let page: Page<i32> = Page::empty(PageRequest::first(10));
        assert!(page.is_empty());
        assert_eq!(page.total, 0);
    }

    #[test]
    fn from_full_set_slices_requested_page() {
        let all: Vec<i32> = (0..10).collect();
        let page = Page::from_full_set(all, PageRequest::new(1, 4));

        assert_eq!(page.items, vec![4, 5, 6, 7]);
        assert_eq!(page.total, 10);
        assert_eq!(page.len(), 4);
    }

    #[test]
    fn from_full_set_last_partial_page() {
        let all: Vec<i32> = (0..10).collect();
        let page = Page::from_full_set(all, PageRequest::new(2, 4));

        assert_eq!(page.items, vec![8, 9]);
        assert_eq!(page.total, 10);
    }

    #[test]
    fn from_full_set_past_the_end_is_empty() {
        let all: Vec<i32> = (0..3).collect();
        let page = Page::from_full_set(all, PageRequest::new(5, 10));

        assert!(page.is_empty());
        assert_eq!(page.total, 3);
    }

    #[test]
    fn from_full_set_unbounded_returns_everything() {
        let all: Vec<i32> = (0..100).collect();
        let page = Page::from_full_set(all.clone(), PageRequest::unbounded());

        assert_eq!(page.items, all);
        assert_eq!(page.total, 100);
    }
}
