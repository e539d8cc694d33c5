//! Category endpoints.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use fundacja_common::AppResult;
use fundacja_core::{CategoryPage, CategoryWithCount, CreateCategoryInput, UpdateCategoryInput};
use fundacja_db::entities::category;
use serde::Deserialize;

use crate::{
    extractors::AdminKey,
    response::{ok, ApiResponse},
    state::AppState,
};

/// List all categories with their published-post counts.
async fn list(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<CategoryWithCount>>> {
    let categories = state.category_service.list_with_counts().await?;
    Ok(ApiResponse::ok(categories))
}

/// Pagination parameter for the category detail page.
#[derive(Debug, Deserialize)]
pub struct PageParams {
    /// 1-based page number.
    pub page: Option<u64>,
}

/// One page of a category's published posts.
async fn detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<PageParams>,
) -> AppResult<ApiResponse<CategoryPage>> {
    let page = state
        .category_service
        .page(&slug, params.page.unwrap_or(1))
        .await?;
    Ok(ApiResponse::ok(page))
}

/// Create a category.
async fn create(
    State(state): State<AppState>,
    _: AdminKey,
    Json(input): Json<CreateCategoryInput>,
) -> AppResult<ApiResponse<category::Model>> {
    let created = state.category_service.create(input).await?;
    Ok(ApiResponse::ok(created))
}

/// Update a category.
async fn update(
    State(state): State<AppState>,
    _: AdminKey,
    Path(slug): Path<String>,
    Json(input): Json<UpdateCategoryInput>,
) -> AppResult<ApiResponse<category::Model>> {
    let updated = state.category_service.update(&slug, input).await?;
    Ok(ApiResponse::ok(updated))
}

/// Delete a category. Blocked while posts reference it.
async fn remove(
    State(state): State<AppState>,
    _: AdminKey,
    Path(slug): Path<String>,
) -> AppResult<impl axum::response::IntoResponse> {
    state.category_service.delete(&slug).await?;
    Ok(ok())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{slug}", get(detail).put(update).delete(remove))
}
