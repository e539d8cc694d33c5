//! Gallery image entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Image in a post's gallery. Owned by the post (cascade delete). A post
/// holds at most 12 gallery images; the bound is validated before insert,
/// not enforced by the schema.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "gallery_image")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(indexed)]
    pub post_id: String,

    pub image: String,

    /// Optional image caption.
    #[sea_orm(nullable)]
    pub caption: Option<String>,

    /// Display order, lowest first.
    #[sea_orm(default_value = 0)]
    pub position: i32,

    pub uploaded_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id",
        on_delete = "Cascade"
    )]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
