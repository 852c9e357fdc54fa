//! Offset-based pagination primitives shared by every list endpoint.
//!
//! A [`PageParams`] value names a 1-based window (`pageNumber`, `pageSize`)
//! and a [`PagedResult`] is the envelope wrapping one window of a stably
//! ordered collection together with its paging metadata.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::ApiError;

/// Default window size when the caller omits `pageSize`.
pub const DEFAULT_PAGE_SIZE: i64 = 10;
/// Upper bound on `pageSize`; larger requests are rejected, not clamped.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Query parameters selecting one page of a listing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// 1-based page number (default: 1)
    #[serde(default = "default_page_number")]
    pub page_number: i64,
    /// Items per page (default: 10, max: 100)
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page_number() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page_number: default_page_number(),
            page_size: default_page_size(),
        }
    }
}

impl PageParams {
    /// Rejects non-positive or oversized windows with per-field messages.
    ///
    /// The window is never silently clamped: a caller asking for page 0 or a
    /// negative size gets a 400, so the window it receives is always exactly
    /// the one it asked for.
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = std::collections::BTreeMap::new();

        if self.page_number < 1 {
            errors.insert(
                "pageNumber".to_string(),
                vec!["pageNumber must be greater than 0".to_string()],
            );
        }

        if self.page_size < 1 {
            errors.insert(
                "pageSize".to_string(),
                vec!["pageSize must be greater than 0".to_string()],
            );
        } else if self.page_size > MAX_PAGE_SIZE {
            errors.insert(
                "pageSize".to_string(),
                vec![format!("pageSize must not exceed {}", MAX_PAGE_SIZE)],
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation(errors))
        }
    }

    /// 0-based page index for the store's windowed query.
    ///
    /// Only meaningful after [`validate`](Self::validate) has passed.
    pub fn page_index(&self) -> u64 {
        (self.page_number - 1) as u64
    }

    /// Window size as the unsigned type the store expects.
    pub fn limit(&self) -> u64 {
        self.page_size as u64
    }
}

/// One window of a stably ordered collection plus its paging metadata.
///
/// `total_count` and `total_pages` always describe the full collection, even
/// when the requested page lies beyond it and `items` comes back empty.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    /// The rows of the requested window, at most `page_size` of them
    pub items: Vec<T>,
    /// 1-based page number that was requested
    pub page_number: u64,
    /// Requested window size
    pub page_size: u64,
    /// Count of all matching rows, ignoring paging
    pub total_count: u64,
    /// `ceil(total_count / page_size)`
    pub total_pages: u64,
    /// Whether a page precedes this one
    pub has_previous: bool,
    /// Whether a page follows this one
    pub has_next: bool,
}

impl<T> PagedResult<T> {
    /// Builds the envelope for one fetched window.
    ///
    /// Call only with params that passed [`PageParams::validate`]; a zero
    /// page size has no meaningful page count.
    pub fn new(items: Vec<T>, total_count: u64, params: &PageParams) -> Self {
        debug_assert!(params.page_number >= 1 && params.page_size >= 1);
        let page_number = params.page_number as u64;
        let page_size = params.page_size as u64;
        let total_pages = total_count.div_ceil(page_size);

        Self {
            items,
            page_number,
            page_size,
            total_count,
            total_pages,
            has_previous: page_number > 1,
            has_next: page_number < total_pages,
        }
    }
}
