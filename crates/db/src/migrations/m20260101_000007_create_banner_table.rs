//! Create banner table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Banner::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Banner::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Banner::Image).string_len(500).not_null())
                    .col(ColumnDef::new(Banner::Link).string_len(500).not_null())
                    .col(ColumnDef::new(Banner::Position).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Banner::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Banner::Order)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Banner::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Active-banner lookup per display slot
        manager
            .create_index(
                Index::create()
                    .name("idx_banner_position_active_order")
                    .table(Banner::Table)
                    .col(Banner::Position)
                    .col(Banner::IsActive)
                    .col(Banner::Order)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Banner::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Banner {
    Table,
    Id,
    Image,
    Link,
    Position,
    IsActive,
    Order,
    CreatedAt,
}
