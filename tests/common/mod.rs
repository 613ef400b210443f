use async_trait::async_trait;
use axum::Router;
use hyper::StatusCode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use listcrate::pagination::total_pages;
use listcrate::{Direction, ListError, ListSource, Page, QueryState, routes};

/// Install the tracing subscriber for a test binary; repeat calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .try_init();
}

/// Row type of the quiz-portal contest list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contest {
    pub id: Uuid,
    pub title: String,
    pub entries: i64,
}

/// In-memory stand-in for the contest collection endpoint.
///
/// Implements the full fetch contract: case-insensitive substring search on
/// the title, single-field ordering, and paging with a total-page count.
#[derive(Debug, Clone)]
pub struct ContestDirectory {
    rows: Vec<Contest>,
}

impl ContestDirectory {
    pub fn new(rows: Vec<Contest>) -> Self {
        Self { rows }
    }

    pub fn with_numbered_contests(count: usize) -> Self {
        let rows = (1..=count)
            .map(|n| Contest {
                id: Uuid::new_v4(),
                title: format!("Contest {n:02}"),
                entries: i64::try_from(count - n).expect("fixture sizes fit in i64"),
            })
            .collect();
        Self::new(rows)
    }
}

#[async_trait]
impl ListSource for ContestDirectory {
    type Row = Contest;

    const RESOURCE_NAME_PLURAL: &'static str = "contests";

    fn sortable_fields() -> Vec<&'static str> {
        vec!["title", "entries"]
    }

    async fn fetch_page(&self, query: &QueryState) -> Result<Page<Contest>, ListError> {
        let needle = query.search.to_lowercase();
        let mut matched: Vec<Contest> = self
            .rows
            .iter()
            .filter(|contest| contest.title.to_lowercase().contains(&needle))
            .cloned()
            .collect();

        if let Some(field) = query.ordering.field() {
            match field {
                "title" => matched.sort_by(|a, b| a.title.cmp(&b.title)),
                "entries" => matched.sort_by_key(|contest| contest.entries),
                other => {
                    return Err(ListError::upstream(
                        StatusCode::BAD_REQUEST,
                        format!("cannot sort contests by {other}"),
                    ));
                }
            }
            if query.ordering.direction_of(field) == Some(Direction::Desc) {
                matched.reverse();
            }
        }

        let total = total_pages(
            u64::try_from(matched.len()).expect("fixture sizes fit"),
            query.nrows,
        );
        let start = usize::try_from((query.page - 1) * query.nrows).expect("page offset fits");
        let rows = matched
            .into_iter()
            .skip(start)
            .take(usize::try_from(query.nrows).expect("page size fits"))
            .collect();
        Ok(Page::new(rows, total))
    }
}

/// Source whose backend is unreachable.
#[derive(Debug, Clone)]
pub struct UnreachableSource;

#[async_trait]
impl ListSource for UnreachableSource {
    type Row = Contest;

    const RESOURCE_NAME_PLURAL: &'static str = "contests";

    fn sortable_fields() -> Vec<&'static str> {
        vec!["title"]
    }

    async fn fetch_page(&self, _query: &QueryState) -> Result<Page<Contest>, ListError> {
        Err(ListError::transport(
            "Could not load contests",
            Some("connection refused".to_string()),
        ))
    }
}

pub fn contest_app(source: ContestDirectory) -> Router {
    let api = Router::new()
        .route(
            "/contests",
            axum::routing::get(routes::get_list::<ContestDirectory>),
        )
        .with_state(source);
    Router::new().nest("/api/v1", api)
}

pub fn unreachable_app() -> Router {
    let api = Router::new()
        .route(
            "/contests",
            axum::routing::get(routes::get_list::<UnreachableSource>),
        )
        .with_state(UnreachableSource);
    Router::new().nest("/api/v1", api)
}
