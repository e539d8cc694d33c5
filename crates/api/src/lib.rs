//! HTTP API layer for the fundacja portal.
//!
//! This crate provides the JSON API consumed by the site frontend:
//!
//! - **Endpoints**: home listing, posts, categories, tags, search, the
//!   medical-center map, banners, and the contact relay
//! - **Extractors**: the shared administrative API-key guard
//! - **Response**: the standard response envelope
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod response;
pub mod state;

pub use endpoints::router;
pub use state::AppState;
