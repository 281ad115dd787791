//! Create reservations table
//!
//! The partial unique index on (day, court_name, slot) restricted to
//! Active rows is the double-booking guard: two concurrent inserts for
//! the same slot race on the index and exactly one wins. Cancelled rows
//! fall outside the index, so a freed slot can be rebooked.

use sea_orm_migration::prelude::*;

use super::m20240601_000001_create_courts::Courts;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reservations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reservations::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Reservations::Day)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Reservations::CourtName).string().not_null())
                    .col(ColumnDef::new(Reservations::Slot).string().not_null())
                    .col(ColumnDef::new(Reservations::ClientRef).string().not_null())
                    .col(
                        ColumnDef::new(Reservations::PaymentState)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::PaymentMethod)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::FullAmountCharged)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Reservations::DepositAmountCharged)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Reservations::Status)
                            .string()
                            .not_null()
                            .default("Active"),
                    )
                    .col(ColumnDef::new(Reservations::CreatedBy).string().not_null())
                    .col(ColumnDef::new(Reservations::Note).string())
                    .col(
                        ColumnDef::new(Reservations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservations_court_name")
                            .from(Reservations::Table, Reservations::CourtName)
                            .to(Courts::Table, Courts::CourtName)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_day")
                    .table(Reservations::Table)
                    .col(Reservations::Day)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_court_name")
                    .table(Reservations::Table)
                    .col(Reservations::CourtName)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_client_ref")
                    .table(Reservations::Table)
                    .col(Reservations::ClientRef)
                    .to_owned(),
            )
            .await?;

        // Only Active rows take part in the uniqueness check.
        manager
            .create_index(
                Index::create()
                    .name("uniq_reservations_active_slot")
                    .table(Reservations::Table)
                    .col(Reservations::Day)
                    .col(Reservations::CourtName)
                    .col(Reservations::Slot)
                    .unique()
                    .and_where(Expr::col(Reservations::Status).eq("Active"))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reservations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Reservations {
    Table,
    Id,
    Day,
    CourtName,
    Slot,
    ClientRef,
    PaymentState,
    PaymentMethod,
    FullAmountCharged,
    DepositAmountCharged,
    Status,
    CreatedBy,
    Note,
    CreatedAt,
    UpdatedAt,
}
