//! Page request parsing and window arithmetic.

/// Page served when the caller does not ask for one.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// Upper bound applied to caller supplied page sizes.
pub const MAX_PAGE_SIZE: u32 = 100;

/// A validated, 1-based page request.
///
/// Both fields are always at least one and the page size never exceeds
/// [`MAX_PAGE_SIZE`], so the derived offset can never go negative and the
/// page count division is always defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Build a request, clamping out-of-range values.
    ///
    /// # Examples
    /// ```
    /// use pagination::{MAX_PAGE_SIZE, PageRequest};
    ///
    /// let request = PageRequest::new(0, 5_000);
    /// assert_eq!(request.page(), 1);
    /// assert_eq!(request.page_size(), MAX_PAGE_SIZE);
    /// ```
    #[must_use]
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Build a request from raw query-string values.
    ///
    /// Absent or non-numeric values fall back to [`DEFAULT_PAGE`] and
    /// [`DEFAULT_PAGE_SIZE`]; zero and negative values clamp to one.
    #[must_use]
    pub fn from_raw(page: Option<&str>, page_size: Option<&str>) -> Self {
        Self::new(
            parse_positive(page, DEFAULT_PAGE),
            parse_positive(page_size, DEFAULT_PAGE_SIZE),
        )
    }

    /// The 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// The maximum number of items on the page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of items to skip before the page starts.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }

    /// Number of items to fetch for the page.
    #[must_use]
    pub fn limit(&self) -> u64 {
        u64::from(self.page_size)
    }

    /// Return the same page size at a different page number.
    #[must_use]
    pub fn with_page(self, page: u32) -> Self {
        Self::new(page, self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_PAGE_SIZE)
    }
}

fn parse_positive(raw: Option<&str>, default: u32) -> u32 {
    let Some(parsed) = raw.and_then(|value| value.trim().parse::<i64>().ok()) else {
        return default;
    };
    if parsed < 1 {
        return 1;
    }
    u32::try_from(parsed).unwrap_or(u32::MAX)
}
