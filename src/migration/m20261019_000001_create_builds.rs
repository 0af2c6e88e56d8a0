//! Create builds table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Builds::Table)
                    .if_not_exists()
                    // Ids are allocated by the client, not the database
                    .col(ColumnDef::new(Builds::Id).integer().not_null().primary_key())
                    .col(ColumnDef::new(Builds::Name).string().not_null())
                    .col(
                        ColumnDef::new(Builds::TestCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Builds::TotalTestCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Builds::Status)
                            .string()
                            .not_null()
                            .default("Pass"),
                    )
                    .col(
                        ColumnDef::new(Builds::DurationMs)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Builds::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Builds::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Builds::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Builds {
    Table,
    Id,
    Name,
    TestCount,
    TotalTestCount,
    Status,
    DurationMs,
    CreatedAt,
    UpdatedAt,
}
