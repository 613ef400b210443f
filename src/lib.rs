//! Traits and functions for building paginated, sortable, searchable list
//! views over REST collections.
//!
//! A [`ListView`] owns the query state of one collection view (free-text
//! search, single-field ordering, page size, page number), synchronizes it
//! bidirectionally with the URL query string, and drives page fetches through
//! a [`ListSource`]. State transitions are pure; fetches carry generation
//! tickets so a superseded request can never overwrite a newer page.
//!
//! ```rust,ignore
//! let url = MemoryUrl::new("?search=algebra&ordering=-created_at&page=2");
//! let mut view = ListView::mount(ContestApi::new(base_url), url);
//! view.refresh().await;
//! assert_eq!(view.rows().len(), view.state().nrows as usize);
//! ```

pub mod controller;
pub mod errors;
pub mod models;
pub mod pagination;
pub mod params;
pub mod routes;
pub mod sort;
pub mod source;

pub use controller::{Action, FetchOutcome, FetchTicket, ListView, MemoryUrl, UrlSync};
pub use errors::ListError;
pub use models::{ListParams, Page};
pub use params::{DEFAULT_NROWS, QueryState};
pub use sort::{Direction, Ordering};
pub use source::ListSource;
