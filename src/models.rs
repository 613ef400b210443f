use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Raw URL query parameters of a list view.
///
/// Every field is an optional string: absent parameters fall back to their
/// defaults and malformed values are silently corrected during the typed
/// parse ([`crate::params::QueryState::from_params`]), never rejected at the
/// deserialization boundary.
///
/// # Search
/// The `search` parameter is a free-text filter; the empty string means
/// "no filter".
///
/// # Ordering
/// The `ordering` parameter is a single token naming the sort field, with a
/// leading `-` for descending order, for example: `title` or `-created_at`.
///
/// # Pagination
/// `nrows` is the page size and `page` the 1-based page number, for example:
/// `nrows=5&page=2`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Free-text filter applied across the view's searchable fields.
    ///
    /// Example: `algebra`
    #[param(example = "algebra")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Ordering token: the sort field, prefixed with `-` for descending.
    ///
    /// Example: `-created_at`
    #[param(example = "-created_at")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordering: Option<String>,
    /// Page size (positive integer).
    ///
    /// Example: `5`
    #[param(example = "5")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nrows: Option<String>,
    /// Page number, 1-based (positive integer).
    ///
    /// Example: `2`
    #[param(example = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
}

/// One page of rows as returned by the data-fetch collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Page<T> {
    /// The rows of the requested page.
    pub rows: Vec<T>,
    /// Total number of pages in the result set under the current filter.
    pub total_pages: u64,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(rows: Vec<T>, total_pages: u64) -> Self {
        Self { rows, total_pages }
    }

    /// An empty reply: no rows, no pages.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            total_pages: 0,
        }
    }
}
