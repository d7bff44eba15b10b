//! Server-paginated page envelope.

use serde::{Deserialize, Serialize};

use crate::PageNumber;

/// One page of records plus the pagination metadata the server reported.
///
/// The wire shape is `{ data, page, per_page, total, total_pages }`. Any other
/// top-level keys (such as a `support` banner) are ignored.
///
/// # Examples
/// ```
/// use pagination::Page;
///
/// let page: Page<u32> = serde_json::from_str(
///     r#"{"data":[1,2],"page":1,"per_page":2,"total":4,"total_pages":2}"#,
/// )
/// .unwrap();
/// assert_eq!(page.data(), &[1, 2]);
/// assert!(page.has_next());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    data: Vec<T>,
    page: PageNumber,
    per_page: u32,
    total: u64,
    total_pages: u32,
}

impl<T> Page<T> {
    /// Assemble a page from its parts.
    #[must_use]
    pub const fn new(
        data: Vec<T>,
        page: PageNumber,
        per_page: u32,
        total: u64,
        total_pages: u32,
    ) -> Self {
        Self {
            data,
            page,
            per_page,
            total,
            total_pages,
        }
    }

    /// Records on this page in server order.
    #[must_use]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Page number this envelope describes.
    #[must_use]
    pub const fn page(&self) -> PageNumber {
        self.page
    }

    /// Page size the server used.
    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Total number of records across all pages.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Total number of pages.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Whether the page carries no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether a later page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page.get() < self.total_pages
    }

    /// Whether an earlier page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page.get() > 1
    }

    /// Consume the page, returning its records.
    #[must_use]
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// Convert each record, short-circuiting on the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `convert`.
    pub fn try_map<U, E, F>(self, convert: F) -> Result<Page<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        let Self {
            data,
            page,
            per_page,
            total,
            total_pages,
        } = self;
        let data = data.into_iter().map(convert).collect::<Result<Vec<_>, E>>()?;
        Ok(Page {
            data,
            page,
            per_page,
            total,
            total_pages,
        })
    }
}
