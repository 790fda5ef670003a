//! Offset pagination primitives.
//!
//! Listing endpoints expose 1-based page numbers while storage adapters need
//! an offset and a limit. [`PageRequest`] validates the former once, at the
//! edge, and derives the latter so every adapter windows results the same
//! way.
//!
//! # Examples
//! ```
//! use pagination::PageRequest;
//!
//! let request = PageRequest::new(3, 10).expect("valid page");
//! assert_eq!(request.offset(), 20);
//! assert_eq!(request.limit(), 10);
//! ```

/// Default number of items returned per page when callers do not override it.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Errors raised when constructing a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// Page numbers start at one.
    #[error("page must be greater than or equal to 1, got {page}")]
    PageOutOfRange {
        /// The rejected page number.
        page: u32,
    },
    /// A page must hold at least one item.
    #[error("limit must be greater than or equal to 1, got {limit}")]
    LimitOutOfRange {
        /// The rejected limit.
        limit: u32,
    },
}

/// A validated 1-based page window.
///
/// ## Invariants
/// - `page >= 1`
/// - `limit >= 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Build a page request, rejecting zero pages and zero limits.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when either bound is zero.
    pub const fn new(page: u32, limit: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::PageOutOfRange { page });
        }
        if limit == 0 {
            return Err(PageRequestError::LimitOutOfRange { limit });
        }
        Ok(Self { page, limit })
    }

    /// The first page with the given limit.
    ///
    /// # Errors
    /// Returns [`PageRequestError::LimitOutOfRange`] when `limit` is zero.
    pub const fn first(limit: u32) -> Result<Self, PageRequestError> {
        Self::new(1, limit)
    }

    /// The 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of items in the page.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of items skipped before this page starts.
    ///
    /// Computed in 64 bits so the product of two `u32` values cannot
    /// overflow.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}
