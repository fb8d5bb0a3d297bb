//! Pagination types for search endpoints.

use serde::{Deserialize, Serialize};

use super::sorting::SortSpec;

/// Default page size.
pub const DEFAULT_PAGE_SIZE: u64 = 10;
/// Maximum page size.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Request parameters for a paged search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    /// Page number (1-based).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Number of items per page.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    /// Optional filter expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Sort specification.
    #[serde(flatten)]
    pub sort: SortSpec,
}

impl PageRequest {
    /// Create a new page request with no filter and no sort.
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            page,
            page_size,
            filter: None,
            sort: SortSpec::default(),
        }
    }

    /// Attach a filter expression.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Attach a sort specification.
    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    /// Clamp page to at least 1 and page size to `1..=max_page_size`.
    pub fn normalized(mut self, max_page_size: u64) -> Self {
        self.page = self.page.max(1);
        self.page_size = self.page_size.clamp(1, max_page_size.max(1));
        self
    }

    /// Number of items to skip for this page.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    /// Maximum number of items on this page.
    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(default_page(), default_page_size())
    }
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Total number of matching items across all pages.
    pub total: u64,
    /// Whether a page exists after this one.
    pub has_next_page: bool,
}

impl<T> PageResult<T> {
    /// Build a page result, deriving `has_next_page` from the totals.
    pub fn new(items: Vec<T>, page: u64, page_size: u64, total: u64) -> Self {
        Self {
            items,
            total,
            has_next_page: page < total_pages(total, page_size),
        }
    }

    /// Convert the items while keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            has_next_page: self.has_next_page,
        }
    }
}

/// `ceil(total / page_size)`, with zero pages for a zero page size.
pub fn total_pages(total: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        0
    } else {
        total.div_ceil(page_size)
    }
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::sorting::SortDirection;

    #[test]
    fn test_offset_and_limit() {
        let req = PageRequest::new(3, 10);
        assert_eq!(req.offset(), 20);
        assert_eq!(req.limit(), 10);
        assert_eq!(PageRequest::new(1, 10).offset(), 0);
    }

    #[test]
    fn test_normalized_clamps() {
        let req = PageRequest::new(0, 0).normalized(100);
        assert_eq!((req.page, req.page_size), (1, 1));

        let req = PageRequest::new(4, 5000).normalized(100);
        assert_eq!((req.page, req.page_size), (4, 100));
    }

    #[test]
    fn test_has_next_page() {
        assert!(PageResult::new(vec![0; 10], 1, 10, 25).has_next_page);
        assert!(PageResult::new(vec![0; 10], 2, 10, 25).has_next_page);
        assert!(!PageResult::new(vec![0; 5], 3, 10, 25).has_next_page);
        assert!(!PageResult::new(vec![0; 10], 1, 10, 10).has_next_page);
        assert!(!PageResult::<u8>::new(vec![], 1, 10, 0).has_next_page);
    }

    #[test]
    fn test_total_pages_zero_page_size() {
        assert_eq!(total_pages(25, 0), 0);
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(0, 10), 0);
    }

    #[test]
    fn test_deserialize_query_shape() {
        let req: PageRequest = serde_json::from_str(
            r#"{"page":2,"pageSize":5,"filter":"size gt 10","sortBy":"size","sortDirection":"DESC"}"#,
        )
        .unwrap();
        assert_eq!(req.page, 2);
        assert_eq!(req.page_size, 5);
        assert_eq!(req.filter.as_deref(), Some("size gt 10"));
        assert_eq!(req.sort.field, "size");
        assert_eq!(req.sort.direction, SortDirection::Desc);

        let req: PageRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req, PageRequest::default());
    }

    #[test]
    fn test_map_keeps_metadata() {
        let page = PageResult::new(vec![1, 2], 1, 2, 5).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.total, 5);
        assert!(page.has_next_page);
    }
}
