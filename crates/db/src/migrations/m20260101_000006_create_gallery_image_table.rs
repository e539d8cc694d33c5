//! Create `gallery_image` table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GalleryImage::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GalleryImage::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(GalleryImage::PostId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(GalleryImage::Image).string_len(500).not_null())
                    .col(ColumnDef::new(GalleryImage::Caption).string_len(200))
                    .col(
                        ColumnDef::new(GalleryImage::Position)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(GalleryImage::UploadedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_gallery_image_post")
                            .from(GalleryImage::Table, GalleryImage::PostId)
                            .to(Post::Table, Post::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Ordered gallery retrieval per post
        manager
            .create_index(
                Index::create()
                    .name("idx_gallery_image_post_position")
                    .table(GalleryImage::Table)
                    .col(GalleryImage::PostId)
                    .col(GalleryImage::Position)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GalleryImage::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum GalleryImage {
    Table,
    Id,
    PostId,
    Image,
    Caption,
    Position,
    UploadedAt,
}

#[derive(Iden)]
enum Post {
    Table,
    Id,
}
