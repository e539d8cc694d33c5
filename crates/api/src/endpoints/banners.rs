//! Banner endpoints.

use axum::{
    extract::{Path, Query, State},
    routing::{get, put},
    Json, Router,
};
use fundacja_common::AppResult;
use fundacja_core::{CreateBannerInput, UpdateBannerInput};
use fundacja_db::entities::banner::{self, BannerPosition};
use serde::Deserialize;

use crate::{
    extractors::AdminKey,
    response::{ok, ApiResponse},
    state::AppState,
};

/// Banner listing filter.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Return only the active banner for this slot.
    pub position: Option<BannerPosition>,
}

/// List banners, or the active banner for one slot.
async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<ApiResponse<Vec<banner::Model>>> {
    let banners = match params.position {
        Some(position) => state
            .banner_service
            .active_for_position(position)
            .await?
            .into_iter()
            .collect(),
        None => state.banner_service.list().await?,
    };
    Ok(ApiResponse::ok(banners))
}

/// Create a banner.
async fn create(
    State(state): State<AppState>,
    _: AdminKey,
    Json(input): Json<CreateBannerInput>,
) -> AppResult<ApiResponse<banner::Model>> {
    let created = state.banner_service.create(input).await?;
    Ok(ApiResponse::ok(created))
}

/// Update a banner.
async fn update(
    State(state): State<AppState>,
    _: AdminKey,
    Path(id): Path<String>,
    Json(input): Json<UpdateBannerInput>,
) -> AppResult<ApiResponse<banner::Model>> {
    let updated = state.banner_service.update(&id, input).await?;
    Ok(ApiResponse::ok(updated))
}

/// Delete a banner.
async fn remove(
    State(state): State<AppState>,
    _: AdminKey,
    Path(id): Path<String>,
) -> AppResult<impl axum::response::IntoResponse> {
    state.banner_service.delete(&id).await?;
    Ok(ok())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", put(update).delete(remove))
}
