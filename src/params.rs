use url::form_urlencoded;

use crate::models::ListParams;
use crate::sort::Ordering;

/// Default page size of a list view.
pub const DEFAULT_NROWS: u64 = 5;

/// Typed pagination/search/sort state of one list view.
///
/// The URL query string is the source of truth across navigation and reload:
/// a view seeds its state from the URL on mount and writes every transition
/// back with a shallow update. The state is never persisted anywhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    /// Free-text filter; empty string means "no filter".
    pub search: String,
    /// Active sort, at most one field.
    pub ordering: Ordering,
    /// Page size, always positive.
    pub nrows: u64,
    /// Current page, 1-based.
    pub page: u64,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search: String::new(),
            ordering: Ordering::none(),
            nrows: DEFAULT_NROWS,
            page: 1,
        }
    }
}

/// Parse a positive integer parameter; anything else is unusable.
fn parse_positive(raw: &str) -> Option<u64> {
    raw.trim().parse().ok().filter(|value| *value > 0)
}

impl QueryState {
    /// Build a typed state from raw URL parameters.
    ///
    /// Missing fields keep `prev`'s value, as do non-numeric or non-positive
    /// `nrows`/`page` values; malformed input is corrected silently, never
    /// surfaced. Mounting a fresh view passes `&QueryState::default()` as
    /// `prev`, which turns `?page=abc&nrows=-1` into `{page: 1, nrows: 5}`.
    #[must_use]
    pub fn from_params(params: &ListParams, prev: &Self) -> Self {
        Self {
            search: params
                .search
                .clone()
                .unwrap_or_else(|| prev.search.clone()),
            ordering: params
                .ordering
                .as_deref()
                .map_or_else(|| prev.ordering.clone(), Ordering::parse),
            nrows: params
                .nrows
                .as_deref()
                .and_then(parse_positive)
                .unwrap_or(prev.nrows),
            page: params
                .page
                .as_deref()
                .and_then(parse_positive)
                .unwrap_or(prev.page),
        }
    }

    /// Inverse of [`QueryState::from_params`]. Fields at their default value
    /// are omitted so URLs stay minimal.
    #[must_use]
    pub fn to_params(&self) -> ListParams {
        ListParams {
            search: (!self.search.is_empty()).then(|| self.search.clone()),
            ordering: (!self.ordering.is_none()).then(|| self.ordering.token()),
            nrows: (self.nrows != DEFAULT_NROWS).then(|| self.nrows.to_string()),
            page: (self.page != 1).then(|| self.page.to_string()),
        }
    }

    /// Encode as a percent-encoded query string (no leading `?`).
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let params = self.to_params();
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in [
            ("search", params.search),
            ("ordering", params.ordering),
            ("nrows", params.nrows),
            ("page", params.page),
        ] {
            if let Some(value) = value {
                serializer.append_pair(key, &value);
            }
        }
        serializer.finish()
    }

    /// Decode a query string (with or without a leading `?`).
    ///
    /// Unknown keys are ignored; for repeated keys the last occurrence wins.
    /// Round trip holds: `parse_query(&s.to_query_string(), &default) == s`
    /// for every valid state.
    #[must_use]
    pub fn parse_query(query: &str, prev: &Self) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = ListParams::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "search" => params.search = Some(value.into_owned()),
                "ordering" => params.ordering = Some(value.into_owned()),
                "nrows" => params.nrows = Some(value.into_owned()),
                "page" => params.page = Some(value.into_owned()),
                _ => {}
            }
        }
        Self::from_params(&params, prev)
    }
}
