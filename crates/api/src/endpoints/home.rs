//! Home page endpoint.

use axum::{extract::State, routing::get, Router};
use fundacja_common::AppResult;
use fundacja_core::HomeListing;

use crate::{response::ApiResponse, state::AppState};

/// Composed home page: featured, newest and grid bands plus the three
/// banner slots.
async fn show(State(state): State<AppState>) -> AppResult<ApiResponse<HomeListing>> {
    let listing = state.listing_service.compose_home().await?;
    Ok(ApiResponse::ok(listing))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(show))
}
