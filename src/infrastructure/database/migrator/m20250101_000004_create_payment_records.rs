//! Create payment_records table

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_users::Users;
use super::m20250101_000003_create_bookings::Bookings;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PaymentRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PaymentRecords::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PaymentRecords::BookingId).uuid())
                    .col(ColumnDef::new(PaymentRecords::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(PaymentRecords::Amount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PaymentRecords::Currency)
                            .string()
                            .not_null()
                            .default("INR"),
                    )
                    .col(
                        ColumnDef::new(PaymentRecords::Provider)
                            .string()
                            .not_null()
                            .default("simulated"),
                    )
                    .col(ColumnDef::new(PaymentRecords::ProviderPaymentId).string())
                    .col(
                        ColumnDef::new(PaymentRecords::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(PaymentRecords::Metadata).json().not_null())
                    .col(
                        ColumnDef::new(PaymentRecords::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_records_booking")
                            .from(PaymentRecords::Table, PaymentRecords::BookingId)
                            .to(Bookings::Table, Bookings::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_records_user")
                            .from(PaymentRecords::Table, PaymentRecords::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_payment_records_booking")
                    .table(PaymentRecords::Table)
                    .col(PaymentRecords::BookingId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PaymentRecords::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum PaymentRecords {
    Table,
    Id,
    BookingId,
    UserId,
    Amount,
    Currency,
    Provider,
    ProviderPaymentId,
    Status,
    Metadata,
    CreatedAt,
}
