//! Navigation links for page-number pagination.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::{PageMeta, PageRequest};

const PAGE_PARAM: &str = "page";
const LIMIT_PARAM: &str = "limit";

/// Errors raised while deriving page links.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    /// The base URL cannot carry query parameters (for example `mailto:`).
    #[error("URL `{url}` cannot carry pagination parameters")]
    CannotBeABase {
        /// The rejected URL.
        url: String,
    },
}

/// Hypermedia links to neighbouring pages.
///
/// Every link keeps the original query string (filters and sorting) and only
/// rewrites the `page` and `limit` parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLinks {
    /// Link to the page that was served.
    #[serde(rename = "self")]
    pub self_: Url,
    /// Link to the first page.
    pub first: Url,
    /// Link to the previous page, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<Url>,
    /// Link to the next page, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<Url>,
    /// Link to the last page. Equal to `first` when nothing matched.
    pub last: Url,
}

impl PageLinks {
    /// Build links for `request` described by `meta`, starting from `base`.
    ///
    /// # Errors
    /// Returns [`PaginationError::CannotBeABase`] when `base` cannot hold a
    /// query string.
    ///
    /// # Examples
    /// ```
    /// use pagination::{PageLinks, PageMeta, PageRequest};
    /// use url::Url;
    ///
    /// let base = Url::parse("https://example.test/items?search=box&page=2").unwrap();
    /// let request = PageRequest::new(2, 10);
    /// let links = PageLinks::new(&base, request, PageMeta::new(request, 35)).unwrap();
    /// assert_eq!(
    ///     links.next.unwrap().as_str(),
    ///     "https://example.test/items?search=box&page=3&limit=10"
    /// );
    /// ```
    pub fn new(base: &Url, request: PageRequest, meta: PageMeta) -> Result<Self, PaginationError> {
        if base.cannot_be_a_base() {
            return Err(PaginationError::CannotBeABase {
                url: base.to_string(),
            });
        }
        let last_page = u32::try_from(meta.total_pages.max(1)).unwrap_or(u32::MAX);
        let link = |page: u32| page_url(base, request.with_page(page));
        Ok(Self {
            self_: link(request.page()),
            first: link(1),
            prev: meta.has_previous().then(|| link(request.page().saturating_sub(1))),
            next: meta.has_next().then(|| link(request.page().saturating_add(1))),
            last: link(last_page),
        })
    }
}

fn page_url(base: &Url, request: PageRequest) -> Url {
    let retained: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(key, _)| key != PAGE_PARAM && key != LIMIT_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    let mut url = base.clone();
    url.set_fragment(None);
    url.query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .append_pair(PAGE_PARAM, &request.page().to_string())
        .append_pair(LIMIT_PARAM, &request.page_size().to_string());
    url
}
