//! Page/limit pagination primitives shared by listing endpoints.
//!
//! Listing endpoints accept a one-based `page` and a `limit` from the query
//! string and answer with an envelope carrying the page of rows plus the total
//! number of matches, so clients can compute page counts themselves.
//!
//! - [`PageRequest`] normalises the raw parameters. Missing or zero values fall
//!   back to [`DEFAULT_PAGE`] and [`DEFAULT_LIMIT`].
//! - [`Page`] is the serialised envelope `{data, page, limit, total}`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page used when the client omits `page` or sends zero.
pub const DEFAULT_PAGE: u32 = 1;
/// Limit used when the client omits `limit` or sends zero.
pub const DEFAULT_LIMIT: u32 = 10;

/// Errors raised while parsing raw pagination parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// `page` was present but not a non-negative integer.
    #[error("page must be a non-negative integer, got {value:?}")]
    InvalidPage {
        /// Raw value supplied by the client.
        value: String,
    },
    /// `limit` was present but not a non-negative integer.
    #[error("limit must be a non-negative integer, got {value:?}")]
    InvalidLimit {
        /// Raw value supplied by the client.
        value: String,
    },
}

/// Normalised page/limit pair.
///
/// # Examples
/// ```
/// use pagination::PageRequest;
///
/// let request = PageRequest::new(Some(2), Some(10));
/// assert_eq!(request.offset(), 10);
///
/// let defaults = PageRequest::new(None, Some(0));
/// assert_eq!((defaults.page(), defaults.limit()), (1, 10));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
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
    /// Build a request, substituting defaults for missing or zero values.
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: page.filter(|value| *value > 0).unwrap_or(DEFAULT_PAGE),
            limit: limit.filter(|value| *value > 0).unwrap_or(DEFAULT_LIMIT),
        }
    }

    /// Parse raw query-string values.
    ///
    /// Empty strings count as absent. Anything else must parse as `u32`.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError`] naming the offending parameter.
    ///
    /// # Examples
    /// ```
    /// use pagination::{PageRequest, PageRequestError};
    ///
    /// let request = PageRequest::parse(Some("3"), None).expect("valid page");
    /// assert_eq!(request.page(), 3);
    ///
    /// let error = PageRequest::parse(Some("two"), None).expect_err("invalid page");
    /// assert!(matches!(error, PageRequestError::InvalidPage { .. }));
    /// ```
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Result<Self, PageRequestError> {
        let page = parse_component(page).map_err(|value| PageRequestError::InvalidPage { value })?;
        let limit =
            parse_component(limit).map_err(|value| PageRequestError::InvalidLimit { value })?;
        Ok(Self::new(page, limit))
    }

    /// One-based page number.
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of rows in the page.
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of rows skipped before the page starts: `(page - 1) * limit`.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

fn parse_component(raw: Option<&str>) -> Result<Option<u32>, String> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse::<u32>().map(Some).map_err(|_| value.to_owned()),
    }
}

/// Paginated response envelope.
///
/// # Examples
/// ```
/// use pagination::{Page, PageRequest};
///
/// let page = Page::new(vec!["a", "b"], PageRequest::default(), 12);
/// assert_eq!(page.total_pages(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Rows on this page.
    pub data: Vec<T>,
    /// One-based page number that was served.
    pub page: u32,
    /// Limit that was applied.
    pub limit: u32,
    /// Number of rows matching the filters before pagination.
    pub total: u64,
}

impl<T> Page<T> {
    /// Assemble an envelope from rows, the request that produced them and the
    /// unpaginated match count.
    pub fn new(data: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            data,
            page: request.page(),
            limit: request.limit(),
            total,
        }
    }

    /// Convert each row while keeping the pagination metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            page: self.page,
            limit: self.limit,
            total: self.total,
        }
    }

    /// Number of pages needed to show `total` rows.
    pub fn total_pages(&self) -> u64 {
        if self.limit == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.limit))
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for page normalisation and the envelope.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, None, 1, 10)]
    #[case(Some(0), Some(0), 1, 10)]
    #[case(Some(3), None, 3, 10)]
    #[case(None, Some(25), 1, 25)]
    fn new_applies_defaults(
        #[case] page: Option<u32>,
        #[case] limit: Option<u32>,
        #[case] expected_page: u32,
        #[case] expected_limit: u32,
    ) {
        let request = PageRequest::new(page, limit);
        assert_eq!(request.page(), expected_page);
        assert_eq!(request.limit(), expected_limit);
    }

    #[rstest]
    #[case(1, 10, 0)]
    #[case(2, 10, 10)]
    #[case(5, 7, 28)]
    fn offset_skips_previous_pages(#[case] page: u32, #[case] limit: u32, #[case] expected: u64) {
        let request = PageRequest::new(Some(page), Some(limit));
        assert_eq!(request.offset(), expected);
    }

    #[rstest]
    fn parse_treats_blank_values_as_absent() {
        let request = PageRequest::parse(Some(""), Some("  ")).expect("blank values");
        assert_eq!(request, PageRequest::default());
    }

    #[rstest]
    #[case(Some("-1"), None)]
    #[case(Some("1.5"), None)]
    #[case(None, Some("ten"))]
    fn parse_rejects_non_integers(#[case] page: Option<&str>, #[case] limit: Option<&str>) {
        let error = PageRequest::parse(page, limit).expect_err("invalid input");
        match (page, error) {
            (Some(raw), PageRequestError::InvalidPage { value }) => assert_eq!(value, raw),
            (None, PageRequestError::InvalidLimit { value }) => assert_eq!(value, "ten"),
            (_, other) => panic!("unexpected error: {other:?}"),
        }
    }

    #[rstest]
    fn envelope_serialises_with_expected_keys() {
        let page = Page::new(vec![1, 2, 3], PageRequest::new(Some(2), Some(3)), 8);
        let value = serde_json::to_value(&page).expect("serialise page");

        assert_eq!(value["data"], serde_json::json!([1, 2, 3]));
        assert_eq!(value["page"], 2);
        assert_eq!(value["limit"], 3);
        assert_eq!(value["total"], 8);
        assert_eq!(page.total_pages(), 3);
    }

    #[rstest]
    fn map_preserves_metadata() {
        let page = Page::new(vec![1, 2], PageRequest::default(), 2).map(|n| n * 10);
        assert_eq!(page.data, vec![10, 20]);
        assert_eq!(page.total, 2);
    }
}
