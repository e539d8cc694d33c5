//! Banner service.

use fundacja_common::{AppError, AppResult, IdGenerator};
use fundacja_db::entities::banner::{self, BannerPosition};
use fundacja_db::repositories::BannerRepository;
use sea_orm::Set;
use serde::Deserialize;

/// Input for creating a banner.
#[derive(Debug, Deserialize)]
pub struct CreateBannerInput {
    pub image: String,
    pub link: String,
    pub position: BannerPosition,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub order: i32,
}

const fn default_true() -> bool {
    true
}

/// Input for updating a banner.
#[derive(Debug, Deserialize)]
pub struct UpdateBannerInput {
    pub image: Option<String>,
    pub link: Option<String>,
    pub position: Option<BannerPosition>,
    pub is_active: Option<bool>,
    pub order: Option<i32>,
}

/// Banner service for business logic.
#[derive(Clone)]
pub struct BannerService {
    banner_repo: BannerRepository,
    id_gen: IdGenerator,
}

impl BannerService {
    /// Create a new banner service.
    #[must_use]
    pub const fn new(banner_repo: BannerRepository) -> Self {
        Self {
            banner_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// All banners grouped by slot and order.
    pub async fn list(&self) -> AppResult<Vec<banner::Model>> {
        self.banner_repo.list_ordered().await
    }

    /// The active banner for a display slot, if any.
    pub async fn active_for_position(
        &self,
        position: BannerPosition,
    ) -> AppResult<Option<banner::Model>> {
        self.banner_repo.active_for_position(position).await
    }

    /// Create a new banner.
    pub async fn create(&self, input: CreateBannerInput) -> AppResult<banner::Model> {
        if input.image.is_empty() {
            return Err(AppError::Validation("Image is required".to_string()));
        }
        if input.link.is_empty() {
            return Err(AppError::Validation("Link is required".to_string()));
        }

        let model = banner::ActiveModel {
            id: Set(self.id_gen.generate()),
            image: Set(input.image),
            link: Set(input.link),
            position: Set(input.position),
            is_active: Set(input.is_active),
            order: Set(input.order),
            created_at: Set(chrono::Utc::now().into()),
        };

        self.banner_repo.create(model).await
    }

    /// Update a banner.
    pub async fn update(&self, id: &str, input: UpdateBannerInput) -> AppResult<banner::Model> {
        let existing = self.banner_repo.get_by_id(id).await?;
        let mut active: banner::ActiveModel = existing.into();

        if let Some(image) = input.image {
            if image.is_empty() {
                return Err(AppError::Validation("Image is required".to_string()));
            }
            active.image = Set(image);
        }

        if let Some(link) = input.link {
            if link.is_empty() {
                return Err(AppError::Validation("Link is required".to_string()));
            }
            active.link = Set(link);
        }

        if let Some(position) = input.position {
            active.position = Set(position);
        }

        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }

        if let Some(order) = input.order {
            active.order = Set(order);
        }

        self.banner_repo.update(active).await
    }

    /// Delete a banner.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let existing = self.banner_repo.get_by_id(id).await?;
        self.banner_repo.delete(&existing.id).await
    }
}
