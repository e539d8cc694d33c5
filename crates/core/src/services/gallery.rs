//! Gallery service for post image galleries.

use fundacja_common::{AppError, AppResult, IdGenerator};
use fundacja_db::entities::gallery_image;
use fundacja_db::repositories::{GalleryImageRepository, PostRepository};
use sea_orm::Set;
use serde::Deserialize;

use super::post::GalleryImageResponse;

/// Maximum number of gallery images per post. Enforced at validation
/// time; the schema carries no corresponding constraint.
pub const MAX_IMAGES_PER_POST: u64 = 12;

/// Maximum caption length in characters.
pub const MAX_CAPTION_LEN: usize = 200;

/// Input for attaching a gallery image to a post.
#[derive(Debug, Deserialize)]
pub struct AttachGalleryImageInput {
    pub image: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub position: i32,
}

/// Input for updating a gallery image.
#[derive(Debug, Deserialize)]
pub struct UpdateGalleryImageInput {
    pub image: Option<String>,
    pub caption: Option<Option<String>>,
    pub position: Option<i32>,
}

/// Gallery service for business logic.
#[derive(Clone)]
pub struct GalleryService {
    gallery_repo: GalleryImageRepository,
    post_repo: PostRepository,
    id_gen: IdGenerator,
}

impl GalleryService {
    /// Create a new gallery service.
    #[must_use]
    pub const fn new(gallery_repo: GalleryImageRepository, post_repo: PostRepository) -> Self {
        Self {
            gallery_repo,
            post_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// A post's gallery, ordered by (position, upload time). The post is
    /// addressed by its slug.
    pub async fn list(&self, post_slug: &str) -> AppResult<Vec<GalleryImageResponse>> {
        let post = self
            .post_repo
            .find_by_slug(post_slug)
            .await?
            .ok_or_else(|| AppError::PostNotFound(post_slug.to_string()))?;
        let images = self.gallery_repo.list_for_post(&post.id).await?;
        Ok(images.into_iter().map(Into::into).collect())
    }

    /// Attach an image to a post's gallery. The 13th image is rejected
    /// before anything is written. The post is addressed by its slug.
    pub async fn attach(
        &self,
        post_slug: &str,
        input: AttachGalleryImageInput,
    ) -> AppResult<GalleryImageResponse> {
        let post = self
            .post_repo
            .find_by_slug(post_slug)
            .await?
            .ok_or_else(|| AppError::PostNotFound(post_slug.to_string()))?;

        if input.image.is_empty() {
            return Err(AppError::Validation("Image is required".to_string()));
        }
        validate_caption(input.caption.as_deref())?;

        self.validate_capacity(&post.id, None).await?;

        let model = gallery_image::ActiveModel {
            id: Set(self.id_gen.generate()),
            post_id: Set(post.id),
            image: Set(input.image),
            caption: Set(input.caption),
            position: Set(input.position),
            uploaded_at: Set(chrono::Utc::now().into()),
        };

        let created = self.gallery_repo.create(model).await?;
        Ok(created.into())
    }

    /// Update a gallery image.
    pub async fn update(
        &self,
        image_id: &str,
        input: UpdateGalleryImageInput,
    ) -> AppResult<GalleryImageResponse> {
        let existing = self.gallery_repo.get_by_id(image_id).await?;

        // Re-saving a member of a full gallery is fine; the bound only
        // counts the other images.
        self.validate_capacity(&existing.post_id, Some(image_id))
            .await?;

        let mut active: gallery_image::ActiveModel = existing.into();

        if let Some(image) = input.image {
            if image.is_empty() {
                return Err(AppError::Validation("Image is required".to_string()));
            }
            active.image = Set(image);
        }

        if let Some(caption) = input.caption {
            validate_caption(caption.as_deref())?;
            active.caption = Set(caption);
        }

        if let Some(position) = input.position {
            active.position = Set(position);
        }

        let updated = self.gallery_repo.update(active).await?;
        Ok(updated.into())
    }

    /// Remove an image from a gallery.
    pub async fn remove(&self, image_id: &str) -> AppResult<()> {
        let existing = self.gallery_repo.get_by_id(image_id).await?;
        self.gallery_repo.delete(&existing.id).await
    }

    async fn validate_capacity(&self, post_id: &str, exclude_id: Option<&str>) -> AppResult<()> {
        let existing = self
            .gallery_repo
            .count_for_post(post_id, exclude_id)
            .await?;
        if existing >= MAX_IMAGES_PER_POST {
            return Err(AppError::Validation(format!(
                "Post can have a maximum of {MAX_IMAGES_PER_POST} images in gallery"
            )));
        }
        Ok(())
    }
}

fn validate_caption(caption: Option<&str>) -> AppResult<()> {
    if let Some(caption) = caption
        && caption.len() > MAX_CAPTION_LEN
    {
        return Err(AppError::Validation(format!(
            "Caption must be at most {MAX_CAPTION_LEN} characters"
        )));
    }
    Ok(())
}
