//! Banner repository.

use std::sync::Arc;

use crate::entities::{banner, Banner};
use fundacja_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

/// Banner repository for database operations.
#[derive(Clone)]
pub struct BannerRepository {
    db: Arc<DatabaseConnection>,
}

impl BannerRepository {
    /// Create a new banner repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a banner by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<banner::Model>> {
        Banner::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a banner by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<banner::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Banner not found: {id}")))
    }

    /// The active banner for a display slot: lowest order first, newest
    /// breaking ties.
    pub async fn active_for_position(
        &self,
        position: banner::BannerPosition,
    ) -> AppResult<Option<banner::Model>> {
        Banner::find()
            .filter(banner::Column::Position.eq(position))
            .filter(banner::Column::IsActive.eq(true))
            .order_by_asc(banner::Column::Order)
            .order_by_desc(banner::Column::CreatedAt)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List all banners grouped by slot and order.
    pub async fn list_ordered(&self) -> AppResult<Vec<banner::Model>> {
        Banner::find()
            .order_by_asc(banner::Column::Position)
            .order_by_asc(banner::Column::Order)
            .order_by_desc(banner::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new banner.
    pub async fn create(&self, model: banner::ActiveModel) -> AppResult<banner::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a banner.
    pub async fn update(&self, model: banner::ActiveModel) -> AppResult<banner::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a banner.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Banner::delete_by_id(id)
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
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_active_for_position() {
        let banner = banner::Model {
            id: "b1".to_string(),
            image: "banners/b1.jpg".to_string(),
            link: "https://example.com".to_string(),
            position: banner::BannerPosition::HomeBanner1,
            is_active: true,
            order: 0,
            created_at: Utc::now().into(),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[banner]])
                .into_connection(),
        );

        let repo = BannerRepository::new(db);
        let result = repo
            .active_for_position(banner::BannerPosition::HomeBanner1)
            .await
            .unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().id, "b1");
    }
}
