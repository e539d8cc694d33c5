//! Tag endpoints.

use axum::{
    extract::{Path, Query, State},
    routing::{delete, get},
    Json, Router,
};
use fundacja_common::AppResult;
use fundacja_core::{CreateTagInput, TagPosts, TagWithCount};
use fundacja_db::entities::tag;
use serde::Deserialize;

use crate::{
    extractors::AdminKey,
    response::{ok, ApiResponse},
    state::AppState,
};

/// List all tags with their published-post counts.
async fn list(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<TagWithCount>>> {
    let tags = state.tag_service.list_with_counts().await?;
    Ok(ApiResponse::ok(tags))
}

/// Limit parameter for the popular-tags listing.
#[derive(Debug, Deserialize)]
pub struct PopularParams {
    pub limit: Option<u64>,
}

const DEFAULT_POPULAR_LIMIT: u64 = 10;

/// Most-used tags by published-post count.
async fn popular(
    State(state): State<AppState>,
    Query(params): Query<PopularParams>,
) -> AppResult<ApiResponse<Vec<TagWithCount>>> {
    let limit = params.limit.unwrap_or(DEFAULT_POPULAR_LIMIT).min(100);
    let tags = state.tag_service.popular(limit).await?;
    Ok(ApiResponse::ok(tags))
}

/// A tag's published posts, newest first.
async fn posts(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<ApiResponse<TagPosts>> {
    let posts = state.tag_service.posts_for(&slug).await?;
    Ok(ApiResponse::ok(posts))
}

/// Create a tag.
async fn create(
    State(state): State<AppState>,
    _: AdminKey,
    Json(input): Json<CreateTagInput>,
) -> AppResult<ApiResponse<tag::Model>> {
    let created = state.tag_service.create(input).await?;
    Ok(ApiResponse::ok(created))
}

/// Delete a tag. Posts are only detached.
async fn remove(
    State(state): State<AppState>,
    _: AdminKey,
    Path(slug): Path<String>,
) -> AppResult<impl axum::response::IntoResponse> {
    state.tag_service.delete(&slug).await?;
    Ok(ok())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/popular", get(popular))
        .route("/{slug}", delete(remove))
        .route("/{slug}/posts", get(posts))
}
