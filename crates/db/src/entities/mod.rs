//! Entity definitions for the content store.

pub mod author;
pub mod banner;
pub mod category;
pub mod gallery_image;
pub mod medical_center;
pub mod post;
pub mod post_tag;
pub mod tag;

pub use author::Entity as Author;
pub use banner::Entity as Banner;
pub use category::Entity as Category;
pub use gallery_image::Entity as GalleryImage;
pub use medical_center::Entity as MedicalCenter;
pub use post::Entity as Post;
pub use post_tag::Entity as PostTag;
pub use tag::Entity as Tag;
