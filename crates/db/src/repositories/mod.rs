//! Repositories for database operations.

mod author;
mod banner;
mod category;
mod gallery_image;
mod medical_center;
mod post;
mod tag;

pub use author::AuthorRepository;
pub use banner::BannerRepository;
pub use category::CategoryRepository;
pub use gallery_image::GalleryImageRepository;
pub use medical_center::MedicalCenterRepository;
pub use post::PostRepository;
pub use tag::TagRepository;
