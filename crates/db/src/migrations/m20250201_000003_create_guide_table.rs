//! Create guide table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Guide::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Guide::Id).string().not_null().primary_key())
                    .col(
                        ColumnDef::new(Guide::UserId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Guide::Description).text().null())
                    .col(
                        ColumnDef::new(Guide::ExperienceYears)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Guide::Languages).json_binary().not_null())
                    .col(ColumnDef::new(Guide::Specialties).json_binary().not_null())
                    .col(ColumnDef::new(Guide::PricePerDay).double().not_null())
                    .col(
                        ColumnDef::new(Guide::Availability)
                            .string_len(16)
                            .not_null()
                            .default("available"),
                    )
                    .col(
                        ColumnDef::new(Guide::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Guide::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_guide_user")
                            .from(Guide::Table, Guide::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_guide_availability")
                    .table(Guide::Table)
                    .col(Guide::Availability)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Guide::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Guide {
    Table,
    Id,
    UserId,
    Description,
    ExperienceYears,
    Languages,
    Specialties,
    PricePerDay,
    Availability,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
