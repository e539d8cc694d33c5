//! Business-logic services.

pub mod banner;
pub mod category;
pub mod contact;
pub mod gallery;
pub mod listing;
pub mod medical_center;
pub mod post;
pub mod search;
pub mod tag;

pub use banner::{BannerService, CreateBannerInput, UpdateBannerInput};
pub use category::{
    CategoryPage, CategoryService, CategoryWithCount, CreateCategoryInput, UpdateCategoryInput,
    CATEGORY_PAGE_SIZE,
};
pub use contact::{ContactInput, ContactService};
pub use gallery::{
    AttachGalleryImageInput, GalleryService, UpdateGalleryImageInput, MAX_IMAGES_PER_POST,
};
pub use listing::{slice_bands, Bands, HomeListing, ListingService};
pub use medical_center::{
    ImportReport, MedicalCenterResponse, MedicalCenterService, DEFAULT_RANGE_DEG,
};
pub use post::{
    hydrate_posts, AuthorResponse, CategoryResponse, CreatePostInput, GalleryImageResponse,
    PostDetail, PostService, PostSummary, TagResponse, UpdatePostInput, RELATED_POSTS_LIMIT,
};
pub use search::{SearchMode, SearchOutcome, SearchService};
pub use tag::{CreateTagInput, TagPosts, TagService, TagWithCount};
