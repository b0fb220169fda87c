//! Page-number pagination primitives shared by listing endpoints.
//!
//! The crate is storage agnostic: callers turn a [`PageRequest`] into an
//! offset/limit window for their store, ask the store for the total number
//! of matching rows, and wrap the page in a [`Page`] carrying [`PageMeta`].
//! [`PageLinks`] derives navigation URLs from the request URL.
//!
//! ```
//! use pagination::{PageMeta, PageRequest};
//!
//! let request = PageRequest::from_raw(Some("3"), Some("10"));
//! assert_eq!(request.offset(), 20);
//!
//! let meta = PageMeta::new(request, 21);
//! assert_eq!(meta.total_pages, 3);
//! ```

mod envelope;
mod links;
mod request;

pub use envelope::{Page, PageMeta};
pub use links::{PageLinks, PaginationError};
pub use request::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageRequest};
