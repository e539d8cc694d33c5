//! Post entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Main content entity. The canonical URL of a post is
/// `/{category.slug}/{post.slug}`; the slug is globally unique and stable
/// once set.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "post")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub title: String,

    /// URL-safe identifier, derived from the title when not set explicitly.
    #[sea_orm(unique, indexed)]
    pub slug: String,

    #[sea_orm(indexed)]
    pub created_at: DateTimeWithTimeZone,

    /// Only published posts appear in public listings and search.
    #[sea_orm(default_value = false)]
    pub published: bool,

    /// Preview description for listing display. At most 500 characters.
    #[sea_orm(column_type = "Text")]
    pub excerpt: String,

    /// Hero image shown in listings and the detail header.
    #[sea_orm(nullable)]
    pub hero_image: Option<String>,

    /// Hero video URL, takes priority over the hero image.
    #[sea_orm(nullable)]
    pub hero_video_url: Option<String>,

    /// Rich-text body.
    #[sea_orm(column_type = "Text")]
    pub content: String,

    /// Owning category (delete-protected).
    #[sea_orm(indexed)]
    pub category_id: String,

    /// Owning author (delete-protected).
    #[sea_orm(indexed)]
    pub author_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_delete = "Restrict"
    )]
    Category,

    #[sea_orm(
        belongs_to = "super::author::Entity",
        from = "Column::AuthorId",
        to = "super::author::Column::Id",
        on_delete = "Restrict"
    )]
    Author,

    #[sea_orm(has_many = "super::gallery_image::Entity")]
    GalleryImages,

    #[sea_orm(has_many = "super::post_tag::Entity")]
    PostTags,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::author::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::gallery_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GalleryImages.def()
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::post_tag::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::post_tag::Relation::Post.def().rev())
    }
}

impl Model {
    /// Canonical URL of this post given its category's slug.
    #[must_use]
    pub fn url(&self, category_slug: &str) -> String {
        format!("/{category_slug}/{}", self.slug)
    }
}

impl ActiveModelBehavior for ActiveModel {}
