//! API endpoints.

mod banners;
mod categories;
mod contact;
mod home;
mod map;
mod posts;
mod search;
mod tags;

use axum::Router;

use crate::state::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/home", home::router())
        .nest("/posts", posts::router())
        .nest("/categories", categories::router())
        .nest("/tags", tags::router())
        .nest("/search", search::router())
        .nest("/map", map::router())
        .nest("/banners", banners::router())
        .nest("/contact", contact::router())
}
