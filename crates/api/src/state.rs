//! Application state.

use std::sync::Arc;

use fundacja_common::Config;
use fundacja_core::{
    BannerService, CategoryService, ContactService, GalleryService, ListingService,
    MedicalCenterService, PostService, SearchService, TagService,
};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Loaded application configuration.
    pub config: Arc<Config>,
    /// Post listing, detail and CRUD.
    pub post_service: PostService,
    /// Category listings and CRUD.
    pub category_service: CategoryService,
    /// Tag listings and CRUD.
    pub tag_service: TagService,
    /// Post gallery management.
    pub gallery_service: GalleryService,
    /// Home page composition.
    pub listing_service: ListingService,
    /// Search page composition.
    pub search_service: SearchService,
    /// Medical-center listing and import.
    pub medical_center_service: MedicalCenterService,
    /// Banner management.
    pub banner_service: BannerService,
    /// Contact form relay.
    pub contact_service: ContactService,
}
