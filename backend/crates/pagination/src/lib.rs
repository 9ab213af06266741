//! Page/limit pagination primitives shared by communities backend endpoints.
//!
//! Clients page through collections with `?page=<n>&limit=<n>` query
//! parameters. This crate owns three concerns:
//!
//! - [`PageQuery`]: the raw, untrusted query parameters.
//! - [`PageRequest`]: a validated request with `skip = (page - 1) * limit`.
//! - [`Page`] and [`PageMeta`]: a slice of results plus the `{total, pages,
//!   page}` metadata returned in response envelopes.
//!
//! # Examples
//!
//! ```
//! use pagination::{PageQuery, PageRequest};
//!
//! let query = PageQuery::new(Some("2"), Some("5"));
//! let request = PageRequest::from_query(&query);
//! assert_eq!(request.offset(), 5);
//!
//! let meta = request.meta(11);
//! assert_eq!(meta.pages, 3);
//! assert_eq!(meta.page, 2);
//! ```

use serde::{Deserialize, Serialize};

/// Page used when the client does not supply a usable `page` parameter.
pub const DEFAULT_PAGE: u32 = 1;
/// Limit used when the client does not supply a usable `limit` parameter.
pub const DEFAULT_LIMIT: u32 = 10;
/// Upper bound applied to client-supplied limits.
pub const MAX_LIMIT: u32 = 100;

/// Errors raised when constructing a [`PageRequest`] from trusted values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    /// Pages are numbered from one.
    #[error("page must be at least 1")]
    ZeroPage,
    /// A page must hold at least one item.
    #[error("limit must be at least 1")]
    ZeroLimit,
    /// The limit exceeds [`MAX_LIMIT`].
    #[error("limit must be at most {max}")]
    LimitTooLarge {
        /// Maximum accepted limit.
        max: u32,
    },
}

/// Raw pagination query parameters as supplied by the client.
///
/// Values are kept as strings so malformed input falls back to defaults
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    /// Requested page number, one-based.
    #[serde(default)]
    pub page: Option<String>,
    /// Requested page size.
    #[serde(default)]
    pub limit: Option<String>,
}

impl PageQuery {
    /// Build a query from optional raw values.
    #[must_use]
    pub fn new(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: page.map(str::to_owned),
            limit: limit.map(str::to_owned),
        }
    }
}

/// Validated page/limit pair.
///
/// ## Invariants
/// - `page >= 1`
/// - `1 <= limit <= MAX_LIMIT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Construct a request from trusted values.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError`] when either value breaks the invariants.
    pub fn new(page: u32, limit: u32) -> Result<Self, PaginationError> {
        if page == 0 {
            return Err(PaginationError::ZeroPage);
        }
        if limit == 0 {
            return Err(PaginationError::ZeroLimit);
        }
        if limit > MAX_LIMIT {
            return Err(PaginationError::LimitTooLarge { max: MAX_LIMIT });
        }
        Ok(Self { page, limit })
    }

    /// Interpret raw client parameters leniently.
    ///
    /// Missing, non-numeric, or non-positive values fall back to
    /// [`DEFAULT_PAGE`] and [`DEFAULT_LIMIT`]; oversized limits are clamped to
    /// [`MAX_LIMIT`].
    #[must_use]
    pub fn from_query(query: &PageQuery) -> Self {
        let page = parse_positive(query.page.as_deref()).unwrap_or(DEFAULT_PAGE);
        let limit = parse_positive(query.limit.as_deref())
            .unwrap_or(DEFAULT_LIMIT)
            .min(MAX_LIMIT);
        Self { page, limit }
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of items to skip: `(page - 1) * limit`.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }

    /// Build response metadata for a collection holding `total` items.
    #[must_use]
    pub fn meta(&self, total: u64) -> PageMeta {
        PageMeta {
            total,
            pages: total.div_ceil(u64::from(self.limit)),
            page: self.page,
        }
    }

    /// Select this page from an already ordered slice.
    ///
    /// Returns items `[offset, min(offset + limit, len))`.
    #[must_use]
    pub fn slice<T: Clone>(&self, items: &[T]) -> Vec<T> {
        let offset = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(self.limit).unwrap_or(usize::MAX);
        items.iter().skip(offset).take(limit).cloned().collect()
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u32> {
    let value = raw?.trim().parse::<i64>().ok()?;
    if value < 1 {
        return None;
    }
    Some(u32::try_from(value).unwrap_or(u32::MAX))
}

/// Pagination metadata returned alongside a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Total number of items across all pages.
    pub total: u64,
    /// Number of pages: `ceil(total / limit)`.
    pub pages: u64,
    /// Current one-based page number.
    pub page: u32,
}

/// One page of results together with the collection total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items on this page, in collection order.
    pub items: Vec<T>,
    /// Total number of items in the collection.
    pub total: u64,
}

impl<T> Page<T> {
    /// Construct a page from items and the collection total.
    #[must_use]
    pub const fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }

    /// Transform each item while keeping the total.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for page parsing and metadata.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, None, 1, 10)]
    #[case(Some("3"), Some("25"), 3, 25)]
    #[case(Some("abc"), Some("x"), 1, 10)]
    #[case(Some("0"), Some("-4"), 1, 10)]
    #[case(Some(" 2 "), Some("1000"), 2, MAX_LIMIT)]
    fn from_query_is_lenient(
        #[case] page: Option<&str>,
        #[case] limit: Option<&str>,
        #[case] expected_page: u32,
        #[case] expected_limit: u32,
    ) {
        let request = PageRequest::from_query(&PageQuery::new(page, limit));
        assert_eq!(request.page(), expected_page);
        assert_eq!(request.limit(), expected_limit);
    }

    #[rstest]
    #[case(0, 10, PaginationError::ZeroPage)]
    #[case(1, 0, PaginationError::ZeroLimit)]
    #[case(1, MAX_LIMIT + 1, PaginationError::LimitTooLarge { max: MAX_LIMIT })]
    fn new_rejects_invalid_values(
        #[case] page: u32,
        #[case] limit: u32,
        #[case] expected: PaginationError,
    ) {
        assert_eq!(PageRequest::new(page, limit), Err(expected));
    }

    #[rstest]
    #[case(0, 10, 0)]
    #[case(10, 10, 1)]
    #[case(11, 10, 2)]
    #[case(25, 7, 4)]
    fn pages_is_ceiling_of_total_over_limit(
        #[case] total: u64,
        #[case] limit: u32,
        #[case] expected_pages: u64,
    ) {
        let request = PageRequest::new(1, limit).expect("valid request");
        assert_eq!(request.meta(total).pages, expected_pages);
    }

    #[rstest]
    #[case(1, 4, vec![0, 1, 2, 3])]
    #[case(3, 4, vec![8, 9])]
    #[case(4, 4, vec![])]
    fn slice_returns_requested_window(
        #[case] page: u32,
        #[case] limit: u32,
        #[case] expected: Vec<u32>,
    ) {
        let items: Vec<u32> = (0..10).collect();
        let request = PageRequest::new(page, limit).expect("valid request");
        assert_eq!(request.slice(&items), expected);
        assert_eq!(request.offset(), u64::from((page - 1) * limit));
    }

    #[rstest]
    fn page_map_keeps_total() {
        let page = Page::new(vec![1, 2], 7).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.total, 7);
    }

    #[rstest]
    fn meta_serialises_with_expected_keys() {
        let meta = PageRequest::default().meta(3);
        let value = serde_json::to_value(meta).expect("serialise meta");
        assert_eq!(value, serde_json::json!({"total": 3, "pages": 1, "page": 1}));
    }
}
