//! Create `medical_center` table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MedicalCenter::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MedicalCenter::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MedicalCenter::Department)
                            .string_len(500)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MedicalCenter::TreatedDiseases)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MedicalCenter::Address).text().not_null())
                    .col(ColumnDef::new(MedicalCenter::Phone).text().not_null())
                    .col(ColumnDef::new(MedicalCenter::Lat).double().not_null())
                    .col(ColumnDef::new(MedicalCenter::Lng).double().not_null())
                    .col(
                        ColumnDef::new(MedicalCenter::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(MedicalCenter::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Department search and default ordering
        manager
            .create_index(
                Index::create()
                    .name("idx_medical_center_department")
                    .table(MedicalCenter::Table)
                    .col(MedicalCenter::Department)
                    .to_owned(),
            )
            .await?;

        // Bounding-box proximity queries
        manager
            .create_index(
                Index::create()
                    .name("idx_medical_center_lat_lng")
                    .table(MedicalCenter::Table)
                    .col(MedicalCenter::Lat)
                    .col(MedicalCenter::Lng)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MedicalCenter::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum MedicalCenter {
    Table,
    Id,
    Department,
    TreatedDiseases,
    Address,
    Phone,
    Lat,
    Lng,
    CreatedAt,
    UpdatedAt,
}
