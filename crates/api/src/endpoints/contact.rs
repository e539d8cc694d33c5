//! Contact form endpoint.

use axum::{extract::State, routing::post, Json, Router};
use fundacja_common::AppResult;
use fundacja_core::ContactInput;

use crate::{response::ok, state::AppState};

/// Relay a contact form submission to the foundation inbox.
async fn submit(
    State(state): State<AppState>,
    Json(input): Json<ContactInput>,
) -> AppResult<impl axum::response::IntoResponse> {
    state.contact_service.send(input).await?;
    Ok(ok())
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(submit))
}
