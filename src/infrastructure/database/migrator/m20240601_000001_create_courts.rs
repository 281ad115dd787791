//! Create courts table
//!
//! One price configuration per court name; amounts in smallest currency
//! units. The unique index keeps at most one config per name.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Courts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Courts::CourtName).string().not_null())
                    .col(
                        ColumnDef::new(Courts::FullAmount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Courts::DepositAmount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Courts::Status)
                            .string()
                            .not_null()
                            .default("Active"),
                    )
                    .col(
                        ColumnDef::new(Courts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Courts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uniq_courts_court_name")
                    .table(Courts::Table)
                    .col(Courts::CourtName)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Courts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Courts {
    Table,
    Id,
    CourtName,
    FullAmount,
    DepositAmount,
    Status,
    CreatedAt,
    UpdatedAt,
}
