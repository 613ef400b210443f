use axum::{
    Json,
    extract::{Query, State},
};
use hyper::HeaderMap;
use serde::Serialize;

use crate::errors::ListError;
use crate::models::{ListParams, Page};
use crate::pagination::{pad_rows, page_headers};
use crate::params::QueryState;
use crate::source::ListSource;

/// Generic list endpoint: the server half of the data-fetch contract.
///
/// Parses the query parameters leniently (absent or malformed values fall
/// back to defaults, an unknown ordering field is dropped), delegates to the
/// [`ListSource`], clamps a past-the-end page to the last valid one, and
/// replies with the page's rows padded to `nrows` plus `X-Page` /
/// `X-Total-Pages` headers. Placeholder rows serialize as `null`.
///
/// # Errors
///
/// Returns the source's [`ListError`] as a sanitized JSON error response.
pub async fn get_list<S>(
    Query(params): Query<ListParams>,
    State(source): State<S>,
) -> Result<(HeaderMap, Json<Page<Option<S::Row>>>), ListError>
where
    S: ListSource + Clone + 'static,
    S::Row: Serialize,
{
    let mut query = QueryState::from_params(&params, &QueryState::default());
    query.ordering = query.ordering.restrict_to(&S::sortable_fields());

    let mut page = source.fetch_page(&query).await?;
    if page.total_pages > 0 && query.page > page.total_pages {
        query.page = page.total_pages;
        page = source.fetch_page(&query).await?;
    }

    let headers = page_headers(query.page, page.total_pages);
    let body = Page::new(pad_rows(page.rows, query.nrows), page.total_pages);
    Ok((headers, Json(body)))
}
