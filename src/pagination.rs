use axum::http::header::HeaderMap;

/// Total number of pages for `total_rows` rows at `nrows` rows per page.
///
/// This is `ceil(total_rows / nrows)`; an empty result set has zero pages.
#[must_use]
pub fn total_pages(total_rows: u64, nrows: u64) -> u64 {
    total_rows.div_ceil(nrows.max(1))
}

/// Clamp a requested page number into `[1, max(total_pages, 1)]`.
///
/// Out-of-range requests (a stale link to page 50 of a 3-page result, a page
/// of 0) are corrected rather than rejected, and an empty result set still
/// clamps to page 1 so a mounted view always has a well-formed page number.
#[must_use]
pub fn clamp_page(page: u64, total_pages: u64) -> u64 {
    page.clamp(1, total_pages.max(1))
}

/// Pad a fetched page with empty placeholder rows up to `nrows`.
///
/// A partially-filled last page keeps the table's row count and height stable
/// across pages. Placeholders are `None`: views render blank cells for them
/// and suppress row-action controls.
#[must_use]
pub fn pad_rows<T>(rows: Vec<T>, nrows: u64) -> Vec<Option<T>> {
    let nrows = usize::try_from(nrows).unwrap_or(usize::MAX);
    let mut padded: Vec<Option<T>> = rows.into_iter().take(nrows).map(Some).collect();
    padded.resize_with(nrows, || None);
    padded
}

/// Pagination response headers for a list reply.
///
/// # Returns
///
/// A `HeaderMap` carrying `X-Page` and `X-Total-Pages`.
#[must_use]
pub fn page_headers(page: u64, total_pages: u64) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(value) = page.to_string().parse() {
        headers.insert("X-Page", value);
    }
    if let Ok(value) = total_pages.to_string().parse() {
        headers.insert("X-Total-Pages", value);
    }
    headers
}
