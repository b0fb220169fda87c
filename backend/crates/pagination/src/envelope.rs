//! Response envelope carrying page items and metadata.

use serde::{Deserialize, Serialize};

use crate::PageRequest;

/// Pagination block returned alongside a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// The 1-based page that was served.
    pub current_page: u32,
    /// Number of pages needed to cover every matching item.
    ///
    /// Zero when nothing matched.
    pub total_pages: u64,
    /// Number of items matching the query across all pages.
    pub total_items: u64,
    /// Page size the window was computed with.
    pub items_per_page: u32,
}

impl PageMeta {
    /// Derive metadata for `request` once the store reports `total_items`.
    ///
    /// # Examples
    /// ```
    /// use pagination::{PageMeta, PageRequest};
    ///
    /// assert_eq!(PageMeta::new(PageRequest::new(1, 10), 0).total_pages, 0);
    /// assert_eq!(PageMeta::new(PageRequest::new(1, 10), 10).total_pages, 1);
    /// assert_eq!(PageMeta::new(PageRequest::new(1, 10), 11).total_pages, 2);
    /// ```
    #[must_use]
    pub fn new(request: PageRequest, total_items: u64) -> Self {
        Self {
            current_page: request.page(),
            total_pages: total_items.div_ceil(request.limit()),
            total_items,
            items_per_page: request.page_size(),
        }
    }

    /// Whether a page follows the current one.
    #[must_use]
    pub fn has_next(&self) -> bool {
        u64::from(self.current_page) < self.total_pages
    }

    /// Whether a page precedes the current one.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.current_page > 1
    }
}

/// A page of items together with its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page, in result order.
    pub items: Vec<T>,
    /// Metadata describing where the page sits in the result set.
    pub pagination: PageMeta,
}

impl<T> Page<T> {
    /// Wrap `items` fetched for `request` out of `total_items` matches.
    #[must_use]
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        Self {
            items,
            pagination: PageMeta::new(request, total_items),
        }
    }

    /// Transform every item while keeping the metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(0, 10, 0)]
    #[case(1, 10, 1)]
    #[case(10, 10, 1)]
    #[case(11, 10, 2)]
    #[case(99, 1, 99)]
    fn total_pages_is_ceiling_division(
        #[case] total: u64,
        #[case] size: u32,
        #[case] expected: u64,
    ) {
        let meta = PageMeta::new(PageRequest::new(1, size), total);
        assert_eq!(meta.total_pages, expected);
    }

    #[rstest]
    fn navigation_flags_follow_position() {
        let first = PageMeta::new(PageRequest::new(1, 10), 25);
        assert!(first.has_next());
        assert!(!first.has_previous());

        let last = PageMeta::new(PageRequest::new(3, 10), 25);
        assert!(!last.has_next());
        assert!(last.has_previous());
    }

    #[rstest]
    fn serialises_with_camel_case_keys() {
        let page = Page::new(vec!["a", "b"], PageRequest::new(2, 2), 5);
        let value = serde_json::to_value(&page).expect("serialise page");
        assert_eq!(
            value,
            json!({
                "items": ["a", "b"],
                "pagination": {
                    "currentPage": 2,
                    "totalPages": 3,
                    "totalItems": 5,
                    "itemsPerPage": 2
                }
            })
        );
    }

    #[rstest]
    fn map_keeps_metadata() {
        let page = Page::new(vec![1, 2], PageRequest::new(1, 2), 2).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.pagination.total_items, 2);
    }
}
