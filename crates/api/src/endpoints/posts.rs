//! Post endpoints.

use axum::{
    extract::{Path, Query, State},
    routing::{get, put},
    Json, Router,
};
use fundacja_common::AppResult;
use fundacja_core::{
    AttachGalleryImageInput, CreatePostInput, GalleryImageResponse, PostDetail, PostSummary,
    UpdateGalleryImageInput, UpdatePostInput,
};
use fundacja_db::entities::post;
use fundacja_db::PostQuery;
use serde::Deserialize;

use crate::{
    extractors::AdminKey,
    response::{ok, ApiResponse},
    state::AppState,
};

/// Published-post listing filters.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Category slug filter.
    pub category: Option<String>,
    /// Tag slug filter.
    pub tag: Option<String>,
    /// Any-of tag slug filter, comma-separated.
    pub tags: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// List published posts, newest first.
async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<ApiResponse<Vec<PostSummary>>> {
    let mut query = PostQuery::new().published();

    if let Some(category) = params.category {
        query = query.by_category(category);
    }
    if let Some(tag) = params.tag {
        query = query.by_tag(tag);
    }
    if let Some(tags) = params.tags {
        let slugs: Vec<String> = tags
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .collect();
        if !slugs.is_empty() {
            query = query.by_tags_list(slugs);
        }
    }
    if let Some(limit) = params.limit {
        query = query.limit(limit.min(100));
    }
    if let Some(offset) = params.offset {
        query = query.offset(offset);
    }

    let posts = state.post_service.list(&query).await?;
    Ok(ApiResponse::ok(posts))
}

/// Post detail at its canonical URL pair.
async fn detail(
    State(state): State<AppState>,
    Path((category_slug, post_slug)): Path<(String, String)>,
) -> AppResult<ApiResponse<PostDetail>> {
    let detail = state.post_service.detail(&category_slug, &post_slug).await?;
    Ok(ApiResponse::ok(detail))
}

/// Create a post.
async fn create(
    State(state): State<AppState>,
    _: AdminKey,
    Json(input): Json<CreatePostInput>,
) -> AppResult<ApiResponse<post::Model>> {
    let created = state.post_service.create(input).await?;
    Ok(ApiResponse::ok(created))
}

/// Update a post, addressed by its slug.
async fn update(
    State(state): State<AppState>,
    _: AdminKey,
    Path(slug): Path<String>,
    Json(input): Json<UpdatePostInput>,
) -> AppResult<ApiResponse<post::Model>> {
    let updated = state.post_service.update(&slug, input).await?;
    Ok(ApiResponse::ok(updated))
}

/// Delete a post, addressed by its slug.
async fn remove(
    State(state): State<AppState>,
    _: AdminKey,
    Path(slug): Path<String>,
) -> AppResult<impl axum::response::IntoResponse> {
    state.post_service.delete(&slug).await?;
    Ok(ok())
}

/// A post's gallery, ordered.
async fn gallery_list(
    State(state): State<AppState>,
    Path(post_slug): Path<String>,
) -> AppResult<ApiResponse<Vec<GalleryImageResponse>>> {
    let images = state.gallery_service.list(&post_slug).await?;
    Ok(ApiResponse::ok(images))
}

/// Attach a gallery image. The 13th image is rejected.
async fn gallery_attach(
    State(state): State<AppState>,
    _: AdminKey,
    Path(post_slug): Path<String>,
    Json(input): Json<AttachGalleryImageInput>,
) -> AppResult<ApiResponse<GalleryImageResponse>> {
    let created = state.gallery_service.attach(&post_slug, input).await?;
    Ok(ApiResponse::ok(created))
}

/// Update a gallery image.
async fn gallery_update(
    State(state): State<AppState>,
    _: AdminKey,
    Path(image_id): Path<String>,
    Json(input): Json<UpdateGalleryImageInput>,
) -> AppResult<ApiResponse<GalleryImageResponse>> {
    let updated = state.gallery_service.update(&image_id, input).await?;
    Ok(ApiResponse::ok(updated))
}

/// Remove a gallery image.
async fn gallery_remove(
    State(state): State<AppState>,
    _: AdminKey,
    Path(image_id): Path<String>,
) -> AppResult<impl axum::response::IntoResponse> {
    state.gallery_service.remove(&image_id).await?;
    Ok(ok())
}

// Posts are addressed by slug (unique, stable); the parameter name is
// shared across routes because segments at the same position must agree.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{slug}", put(update).delete(remove))
        .route("/{slug}/gallery", get(gallery_list).post(gallery_attach))
        .route(
            "/gallery/{image_id}",
            put(gallery_update).delete(gallery_remove),
        )
        .route("/{slug}/{post_slug}", get(detail))
}
