//! Search endpoint.

use axum::{
    extract::{Query, State},
    routing::get,
    Router,
};
use fundacja_common::AppResult;
use fundacja_core::{SearchMode, SearchOutcome};
use serde::Deserialize;

use crate::{response::ApiResponse, state::AppState};

/// Search page parameters.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// The query string. Empty or missing performs no search.
    pub q: Option<String>,
    /// `title_content` (default) or `tags`.
    pub search_type: Option<SearchMode>,
}

/// Run the search page query.
async fn show(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<ApiResponse<SearchOutcome>> {
    let outcome = state
        .search_service
        .search(
            params.q.as_deref().unwrap_or(""),
            params.search_type.unwrap_or_default(),
        )
        .await?;
    Ok(ApiResponse::ok(outcome))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(show))
}
