//! Banner entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Fixed display slots for promotional banners on the home page.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum BannerPosition {
    /// After the first three posts.
    #[sea_orm(string_value = "home_banner_1")]
    #[serde(rename = "home_banner_1")]
    HomeBanner1,

    /// After six posts.
    #[sea_orm(string_value = "home_banner_2")]
    #[serde(rename = "home_banner_2")]
    HomeBanner2,

    /// After twelve posts.
    #[sea_orm(string_value = "home_banner_3")]
    #[serde(rename = "home_banner_3")]
    HomeBanner3,
}

/// Promotional banner.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "banner")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub image: String,

    /// Destination URL when the banner is clicked.
    pub link: String,

    /// Display slot on the website.
    #[sea_orm(indexed)]
    pub position: BannerPosition,

    #[sea_orm(default_value = true, indexed)]
    pub is_active: bool,

    /// Display order within a slot, lowest first.
    #[sea_orm(default_value = 0)]
    pub order: i32,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
