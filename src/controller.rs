//! The list-view controller.
//!
//! [`ListView`] owns the [`QueryState`] of one collection view and keeps the
//! displayed page of rows, the URL query string, and the total-page count
//! mutually consistent. All transitions are pure reducer steps
//! ([`QueryState::apply`]) followed by a shallow URL write; the only I/O is
//! delegated to the view's [`ListSource`].
//!
//! Fetches are raced explicitly: every state transition bumps a generation
//! counter, every fetch carries a [`FetchTicket`] stamped with the generation
//! it was issued under, and a ticket that no longer matches is dropped on
//! arrival. The latest query state always wins on display. Dropping the view
//! (unmount) ends the race outright, since applying a result needs the view.

use crate::errors::ListError;
use crate::models::Page;
use crate::pagination::{clamp_page, pad_rows};
use crate::params::QueryState;
use crate::source::ListSource;

/// The shallow-URL collaborator of a list view.
///
/// The URL is treated as an external key-value store with a typed read/write
/// interface; `replace_query` must update the address bar without navigating
/// (no reload, no remount). The mounted view owns the URL exclusively.
pub trait UrlSync {
    /// The current query string (without the leading `?`).
    fn query(&self) -> String;

    /// Replace the query string without navigating.
    fn replace_query(&mut self, query: &str);
}

/// In-memory [`UrlSync`] implementation for tests and embedders without a
/// location bar.
#[derive(Debug, Clone, Default)]
pub struct MemoryUrl {
    query: String,
}

impl MemoryUrl {
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        let query = query.into();
        Self {
            query: query.strip_prefix('?').unwrap_or(&query).to_string(),
        }
    }
}

impl UrlSync for MemoryUrl {
    fn query(&self) -> String {
        self.query.clone()
    }

    fn replace_query(&mut self, query: &str) {
        self.query = query.to_string();
    }
}

/// A state transition of a list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Replace the free-text filter.
    SetSearch(String),
    /// Replace the page size. Zero is ignored.
    SetNrows(u64),
    /// Two-state column-header toggle.
    ToggleOrdering(String),
    /// Jump to a page, clamped against the known page count.
    GoToPage {
        page: u64,
        total_pages: u64,
    },
}

impl QueryState {
    /// Pure reducer: apply one transition and return the next state.
    ///
    /// Changing the search, page size, or ordering invalidates the previous
    /// page position, so those transitions reset `page` to 1.
    #[must_use]
    pub fn apply(&self, action: &Action) -> Self {
        match action {
            Action::SetSearch(value) => Self {
                search: value.clone(),
                page: 1,
                ..self.clone()
            },
            Action::SetNrows(0) => self.clone(),
            Action::SetNrows(nrows) => Self {
                nrows: *nrows,
                page: 1,
                ..self.clone()
            },
            Action::ToggleOrdering(field) => Self {
                ordering: self.ordering.toggled(field),
                page: 1,
                ..self.clone()
            },
            Action::GoToPage { page, total_pages } => Self {
                page: clamp_page(*page, *total_pages),
                ..self.clone()
            },
        }
    }
}

/// Generation token for one fetch.
///
/// Issued by [`ListView::begin_fetch`]; carries a snapshot of the query state
/// the fetch must be keyed off. [`ListView::apply_fetch`] only applies the
/// result if no transition happened in between.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    generation: u64,
    state: QueryState,
}

impl FetchTicket {
    /// The query state this fetch is keyed off.
    #[must_use]
    pub fn state(&self) -> &QueryState {
        &self.state
    }
}

/// Whether a fetch result made it to the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The result was applied to the display.
    Applied,
    /// The fetch was superseded by a later transition; the result was dropped.
    Stale,
}

/// Controller for one paginated, sortable, searchable collection view.
pub struct ListView<S: ListSource, U: UrlSync> {
    source: S,
    url: U,
    state: QueryState,
    total_pages: u64,
    rows: Vec<Option<S::Row>>,
    error: Option<ListError>,
    generation: u64,
}

impl<S: ListSource, U: UrlSync> ListView<S, U> {
    /// Mount a view, seeding its state from the URL's query parameters.
    ///
    /// Missing or malformed parameters fall back to defaults; an ordering
    /// token naming a field outside [`ListSource::sortable_fields`] is
    /// dropped. The URL is not rewritten on mount.
    pub fn mount(source: S, url: U) -> Self {
        let seeded = QueryState::parse_query(&url.query(), &QueryState::default());
        let state = QueryState {
            ordering: seeded.ordering.restrict_to(&S::sortable_fields()),
            ..seeded
        };
        tracing::debug!(resource = S::RESOURCE_NAME_PLURAL, state = ?state, "list view mounted");
        let rows = pad_rows(Vec::new(), state.nrows);
        Self {
            source,
            url,
            state,
            total_pages: 0,
            rows,
            error: None,
            generation: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// Displayed rows, padded with `None` placeholders up to `nrows`.
    #[must_use]
    pub fn rows(&self) -> &[Option<S::Row>] {
        &self.rows
    }

    /// Page count reported by the last applied fetch; 0 before the first.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.total_pages
    }

    /// The last fetch error, rendered by the view in place of the table.
    #[must_use]
    pub fn error(&self) -> Option<&ListError> {
        self.error.as_ref()
    }

    #[must_use]
    pub fn url(&self) -> &U {
        &self.url
    }

    /// Replace the free-text filter; resets to page 1 and updates the URL.
    pub fn set_search(&mut self, value: impl Into<String>) -> &QueryState {
        self.dispatch(&Action::SetSearch(value.into()))
    }

    /// Replace the page size; resets to page 1 and updates the URL.
    /// A page size of 0 is ignored.
    pub fn set_nrows(&mut self, nrows: u64) -> &QueryState {
        self.dispatch(&Action::SetNrows(nrows))
    }

    /// Toggle the sort on a column header; resets to page 1 and updates the
    /// URL. Fields outside [`ListSource::sortable_fields`] are ignored.
    pub fn toggle_ordering(&mut self, field: &str) -> &QueryState {
        if !S::sortable_fields().contains(&field) {
            tracing::debug!(
                resource = S::RESOURCE_NAME_PLURAL,
                field,
                "ignoring toggle on unsortable field"
            );
            return &self.state;
        }
        self.dispatch(&Action::ToggleOrdering(field.to_string()))
    }

    /// Jump to a page, clamped into `[1, total_pages]`; updates the URL.
    /// An out-of-range page is never sent to the backend.
    pub fn go_to_page(&mut self, page: u64) -> &QueryState {
        self.dispatch(&Action::GoToPage {
            page,
            total_pages: self.total_pages,
        })
    }

    fn dispatch(&mut self, action: &Action) -> &QueryState {
        let next = self.state.apply(action);
        if next != self.state {
            self.state = next;
            self.generation += 1;
            let query = self.state.to_query_string();
            tracing::debug!(
                resource = S::RESOURCE_NAME_PLURAL,
                query = %query,
                "query state changed"
            );
            self.url.replace_query(&query);
        }
        &self.state
    }

    /// Stamp a ticket for a fetch keyed off the current query state.
    #[must_use]
    pub fn begin_fetch(&self) -> FetchTicket {
        FetchTicket {
            generation: self.generation,
            state: self.state.clone(),
        }
    }

    /// Run the fetch for a ticket against the view's source.
    ///
    /// # Errors
    ///
    /// Propagates the source's [`ListError`]; pass the result to
    /// [`ListView::apply_fetch`] either way.
    pub async fn fetch(&self, ticket: &FetchTicket) -> Result<Page<S::Row>, ListError> {
        self.source.fetch_page(&ticket.state).await
    }

    /// Apply a fetch result, unless the ticket was superseded.
    ///
    /// A stale ticket (any transition happened after [`ListView::begin_fetch`])
    /// is dropped without touching the display: the latest query state wins.
    /// On success the rows are padded to `nrows` and the page count adopted;
    /// on failure the error is stored for the view while the query state and
    /// URL stay unchanged so the user can correct filters and retry.
    pub fn apply_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Page<S::Row>, ListError>,
    ) -> FetchOutcome {
        if ticket.generation != self.generation {
            tracing::debug!(
                resource = S::RESOURCE_NAME_PLURAL,
                ticket_generation = ticket.generation,
                current_generation = self.generation,
                "dropping superseded fetch result"
            );
            return FetchOutcome::Stale;
        }
        match result {
            Ok(page) => {
                self.total_pages = page.total_pages;
                self.rows = pad_rows(page.rows, self.state.nrows);
                self.error = None;
            }
            Err(err) => {
                err.log_internal();
                self.error = Some(err);
            }
        }
        FetchOutcome::Applied
    }

    /// Fetch and apply the current page: the sequential
    /// begin/fetch/apply cycle.
    ///
    /// When the reply reveals the requested page is past the end (a stale
    /// link to page 50 of a 3-page result), the page is clamped to the last
    /// valid one and fetched again.
    pub async fn refresh(&mut self) {
        let ticket = self.begin_fetch();
        let result = self.source.fetch_page(&ticket.state).await;
        self.apply_fetch(ticket, result);

        if self.error.is_none() && self.total_pages > 0 && self.state.page > self.total_pages {
            self.go_to_page(self.total_pages);
            let ticket = self.begin_fetch();
            let result = self.source.fetch_page(&ticket.state).await;
            self.apply_fetch(ticket, result);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::Ordering;

    #[test]
    fn test_set_search_resets_page() {
        let state = QueryState {
            page: 4,
            ..QueryState::default()
        };
        let next = state.apply(&Action::SetSearch("algebra".to_string()));
        assert_eq!(next.search, "algebra");
        assert_eq!(next.page, 1);
    }

    #[test]
    fn test_set_nrows_resets_page() {
        let state = QueryState {
            page: 4,
            ..QueryState::default()
        };
        let next = state.apply(&Action::SetNrows(10));
        assert_eq!(next.nrows, 10);
        assert_eq!(next.page, 1);
    }

    #[test]
    fn test_set_nrows_zero_is_ignored() {
        let state = QueryState {
            page: 4,
            ..QueryState::default()
        };
        assert_eq!(state.apply(&Action::SetNrows(0)), state);
    }

    #[test]
    fn test_toggle_ordering_resets_page() {
        let state = QueryState {
            page: 4,
            ..QueryState::default()
        };
        let next = state.apply(&Action::ToggleOrdering("title".to_string()));
        assert_eq!(next.ordering, Ordering::asc("title"));
        assert_eq!(next.page, 1);
    }

    #[test]
    fn test_go_to_page_clamps() {
        let state = QueryState::default();
        let next = state.apply(&Action::GoToPage {
            page: 50,
            total_pages: 3,
        });
        assert_eq!(next.page, 3);
        let next = state.apply(&Action::GoToPage {
            page: 0,
            total_pages: 3,
        });
        assert_eq!(next.page, 1);
    }

    #[test]
    fn test_any_filter_sequence_ends_on_page_one() {
        let mut state = QueryState {
            page: 9,
            ..QueryState::default()
        };
        let actions = [
            Action::SetSearch("geometry".to_string()),
            Action::ToggleOrdering("title".to_string()),
            Action::SetNrows(25),
            Action::ToggleOrdering("title".to_string()),
        ];
        for action in &actions {
            state = state.apply(action);
            assert_eq!(state.page, 1);
        }
    }

    #[test]
    fn test_memory_url_strips_question_mark() {
        let url = MemoryUrl::new("?page=2");
        assert_eq!(url.query(), "page=2");
    }
}
