//! Create agency table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Agency::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Agency::Id).string().not_null().primary_key())
                    .col(
                        ColumnDef::new(Agency::UserId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Agency::CompanyName)
                            .string_len(256)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Agency::LicenseNumber)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Agency::Description).text().not_null())
                    .col(ColumnDef::new(Agency::Address).string().not_null())
                    .col(ColumnDef::new(Agency::Website).string().null())
                    .col(ColumnDef::new(Agency::EmployeeCount).integer().not_null())
                    .col(
                        ColumnDef::new(Agency::EstablishedYear)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Agency::Specialties)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Agency::ServiceAreas)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Agency::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Agency::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_agency_user")
                            .from(Agency::Table, Agency::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_agency_user_id")
                    .table(Agency::Table)
                    .col(Agency::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Agency::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Agency {
    Table,
    Id,
    UserId,
    CompanyName,
    LicenseNumber,
    Description,
    Address,
    Website,
    EmployeeCount,
    EstablishedYear,
    Specialties,
    ServiceAreas,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
