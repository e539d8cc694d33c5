//! Gallery image repository.

use std::sync::Arc;

use crate::entities::{gallery_image, GalleryImage};
use fundacja_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

/// Gallery image repository for database operations.
#[derive(Clone)]
pub struct GalleryImageRepository {
    db: Arc<DatabaseConnection>,
}

impl GalleryImageRepository {
    /// Create a new gallery image repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a gallery image by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<gallery_image::Model>> {
        GalleryImage::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a gallery image by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<gallery_image::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Gallery image not found: {id}")))
    }

    /// Gallery images for a post, ordered by (position, upload time).
    pub async fn list_for_post(&self, post_id: &str) -> AppResult<Vec<gallery_image::Model>> {
        GalleryImage::find()
            .filter(gallery_image::Column::PostId.eq(post_id))
            .order_by_asc(gallery_image::Column::Position)
            .order_by_asc(gallery_image::Column::UploadedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count a post's gallery images, optionally excluding one row (the
    /// row being updated).
    pub async fn count_for_post(
        &self,
        post_id: &str,
        exclude_id: Option<&str>,
    ) -> AppResult<u64> {
        let mut query = GalleryImage::find().filter(gallery_image::Column::PostId.eq(post_id));

        if let Some(id) = exclude_id {
            query = query.filter(gallery_image::Column::Id.ne(id));
        }

        query
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new gallery image.
    pub async fn create(
        &self,
        model: gallery_image::ActiveModel,
    ) -> AppResult<gallery_image::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a gallery image.
    pub async fn update(
        &self,
        model: gallery_image::ActiveModel,
    ) -> AppResult<gallery_image::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a gallery image.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        GalleryImage::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_count_for_post() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::from(12i64),
                }]])
                .into_connection(),
        );

        let repo = GalleryImageRepository::new(db);
        let count = repo.count_for_post("post1", None).await.unwrap();

        assert_eq!(count, 12);
    }
}
