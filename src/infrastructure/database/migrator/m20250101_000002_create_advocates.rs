//! Create advocates table

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Advocates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Advocates::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Advocates::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(Advocates::ConsultationFee)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Advocates::Currency)
                            .string()
                            .not_null()
                            .default("INR"),
                    )
                    .col(ColumnDef::new(Advocates::Availability).json().not_null())
                    .col(
                        ColumnDef::new(Advocates::Bio)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Advocates::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Advocates::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_advocates_user")
                            .from(Advocates::Table, Advocates::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_advocates_user")
                    .table(Advocates::Table)
                    .col(Advocates::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Advocates::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Advocates {
    Table,
    Id,
    UserId,
    ConsultationFee,
    Currency,
    Availability,
    Bio,
    IsActive,
    CreatedAt,
}
