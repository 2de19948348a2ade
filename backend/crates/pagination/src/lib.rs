//! Page-number pagination primitives shared by backend list endpoints.
//!
//! A [`PageRequest`] pairs a one-based page number with a bounded page size.
//! Storage adapters translate it into "skip `offset`, take `limit`" over an
//! already-filtered, stably ordered result set.
//!
//! # Examples
//! ```
//! use pagination::PageRequest;
//!
//! let request = PageRequest::new(3, 20)?;
//! assert_eq!(request.offset(), 40);
//! assert_eq!(request.limit(), 20);
//! # Ok::<(), pagination::PageRequestError>(())
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page number used when the caller does not supply one.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when the caller does not supply one.
pub const DEFAULT_LIMIT: u32 = 10;

/// Largest page size a caller may request.
pub const MAX_LIMIT: u32 = 100;

/// Errors raised when constructing a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// Page numbers start at one.
    #[error("page must be at least 1")]
    PageOutOfRange,
    /// Page size is outside `1..=MAX_LIMIT`.
    #[error("limit must be between 1 and {max}, got {limit}")]
    LimitOutOfRange {
        /// Rejected page size.
        limit: u32,
        /// Largest accepted page size.
        max: u32,
    },
}

/// Validated one-based page selection.
///
/// ## Invariants
/// - `page >= 1`
/// - `1 <= limit <= MAX_LIMIT`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PageRequestDto", into = "PageRequestDto")]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Build a page request, rejecting out-of-range values.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when `page` is zero or `limit` is outside
    /// `1..=MAX_LIMIT`.
    pub const fn new(page: u32, limit: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::PageOutOfRange);
        }
        if limit == 0 || limit > MAX_LIMIT {
            return Err(PageRequestError::LimitOutOfRange {
                limit,
                max: MAX_LIMIT,
            });
        }
        Ok(Self { page, limit })
    }

    /// Build a page request from optional inputs, applying the defaults for
    /// missing values.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when a supplied value is out of range.
    pub fn from_optional(page: Option<u32>, limit: Option<u32>) -> Result<Self, PageRequestError> {
        Self::new(
            page.unwrap_or(DEFAULT_PAGE),
            limit.unwrap_or(DEFAULT_LIMIT),
        )
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of records on this page.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of records preceding this page: `(page - 1) * limit`.
    ///
    /// Computed in 64 bits so the largest page number cannot overflow.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }

    /// The following page with the same size, if the page number fits.
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        self.page.checked_add(1).map(|page| Self {
            page,
            limit: self.limit,
        })
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct PageRequestDto {
    page: u32,
    limit: u32,
}

impl From<PageRequest> for PageRequestDto {
    fn from(value: PageRequest) -> Self {
        Self {
            page: value.page,
            limit: value.limit,
        }
    }
}

impl TryFrom<PageRequestDto> for PageRequest {
    type Error = PageRequestError;

    fn try_from(value: PageRequestDto) -> Result<Self, Self::Error> {
        Self::new(value.page, value.limit)
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for page request construction and offsets.

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_is_first_page_of_ten() {
        let request = PageRequest::default();
        assert_eq!(request.page(), 1);
        assert_eq!(request.limit(), 10);
        assert_eq!(request.offset(), 0);
    }

    #[rstest]
    #[case(1, 10, 0)]
    #[case(2, 10, 10)]
    #[case(3, 25, 50)]
    #[case(u32::MAX, MAX_LIMIT, (u32::MAX as u64 - 1) * MAX_LIMIT as u64)]
    fn offset_skips_preceding_pages(#[case] page: u32, #[case] limit: u32, #[case] offset: u64) {
        let request = PageRequest::new(page, limit).expect("valid request");
        assert_eq!(request.offset(), offset);
    }

    #[rstest]
    fn zero_page_is_rejected() {
        assert_eq!(
            PageRequest::new(0, 10),
            Err(PageRequestError::PageOutOfRange)
        );
    }

    #[rstest]
    #[case(0)]
    #[case(101)]
    fn limit_outside_bounds_is_rejected(#[case] limit: u32) {
        assert_eq!(
            PageRequest::new(1, limit),
            Err(PageRequestError::LimitOutOfRange {
                limit,
                max: MAX_LIMIT
            })
        );
    }

    #[rstest]
    fn limit_bounds_are_inclusive() {
        assert!(PageRequest::new(1, 1).is_ok());
        assert!(PageRequest::new(1, MAX_LIMIT).is_ok());
    }

    #[rstest]
    fn optional_inputs_fall_back_to_defaults() {
        let request = PageRequest::from_optional(None, Some(5)).expect("valid request");
        assert_eq!(request.page(), DEFAULT_PAGE);
        assert_eq!(request.limit(), 5);
    }

    #[rstest]
    fn next_advances_page_and_stops_at_max() {
        let request = PageRequest::new(1, 10).expect("valid request");
        let next = request.next().expect("second page");
        assert_eq!(next.page(), 2);
        assert_eq!(next.offset(), 10);

        let last = PageRequest::new(u32::MAX, 10).expect("valid request");
        assert!(last.next().is_none());
    }

    #[rstest]
    fn deserialising_rejects_invalid_limits() {
        let err = serde_json::from_str::<PageRequest>(r#"{"page":1,"limit":500}"#)
            .expect_err("limit above maximum");
        assert!(err.to_string().contains("limit must be between 1 and 100"));
    }
}
