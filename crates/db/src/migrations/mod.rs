//! Database migrations.
//!
//! Schema migrations for the database.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20260101_000001_create_author_table;
mod m20260101_000002_create_category_table;
mod m20260101_000003_create_tag_table;
mod m20260101_000004_create_post_table;
mod m20260101_000005_create_post_tag_table;
mod m20260101_000006_create_gallery_image_table;
mod m20260101_000007_create_banner_table;
mod m20260101_000008_create_medical_center_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_author_table::Migration),
            Box::new(m20260101_000002_create_category_table::Migration),
            Box::new(m20260101_000003_create_tag_table::Migration),
            Box::new(m20260101_000004_create_post_table::Migration),
            Box::new(m20260101_000005_create_post_tag_table::Migration),
            Box::new(m20260101_000006_create_gallery_image_table::Migration),
            Box::new(m20260101_000007_create_banner_table::Migration),
            Box::new(m20260101_000008_create_medical_center_table::Migration),
        ]
    }
}
