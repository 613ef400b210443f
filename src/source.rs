use async_trait::async_trait;

use crate::errors::ListError;
use crate::models::Page;
use crate::params::QueryState;

/// The data-fetch collaborator of a list view.
///
/// Given the current [`QueryState`] it returns the matching page of rows and
/// the total page count under that filter, or an error. This is the only
/// boundary to the backend and the only operation in the crate that performs
/// I/O; how it is implemented (HTTP client, database, in-memory fixture) is
/// opaque to the controller.
#[async_trait]
pub trait ListSource: Send + Sync {
    type Row: Clone + Send + Sync;

    /// Plural resource name, used in logs and error messages.
    const RESOURCE_NAME_PLURAL: &'static str;

    /// Fields the backend accepts in the ordering token.
    ///
    /// Ordering tokens naming any other field are dropped before they reach
    /// [`ListSource::fetch_page`]. Nothing is sortable unless declared.
    #[must_use]
    fn sortable_fields() -> Vec<&'static str> {
        Vec::new()
    }

    /// Fetch one page of rows for `query`.
    ///
    /// # Errors
    ///
    /// Returns a [`ListError`] when the backend cannot be reached, answers
    /// with a non-success status, or returns an undecodable reply.
    async fn fetch_page(&self, query: &QueryState) -> Result<Page<Self::Row>, ListError>;
}
