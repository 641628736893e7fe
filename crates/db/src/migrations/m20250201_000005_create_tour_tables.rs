//! Create tour, tour_gallery, tour_schedule and schedule_activity tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create tour table
        manager
            .create_table(
                Table::create()
                    .table(Tour::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Tour::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Tour::AgencyId).string().not_null())
                    .col(ColumnDef::new(Tour::TourName).string_len(256).not_null())
                    .col(ColumnDef::new(Tour::CountryId).string().not_null())
                    .col(ColumnDef::new(Tour::CityId).string().not_null())
                    .col(ColumnDef::new(Tour::ServiceId).string().not_null())
                    .col(ColumnDef::new(Tour::Itinerary).text().null())
                    .col(ColumnDef::new(Tour::Duration).string_len(64).null())
                    .col(ColumnDef::new(Tour::DepartureDate).date().null())
                    .col(ColumnDef::new(Tour::DeparturePlace).string().null())
                    .col(ColumnDef::new(Tour::PublicId).string().null())
                    .col(ColumnDef::new(Tour::CoverPhoto).string().null())
                    .col(ColumnDef::new(Tour::Description).text().null())
                    .col(ColumnDef::new(Tour::PriceAdult).double().null())
                    .col(ColumnDef::new(Tour::PriceChild).double().null())
                    .col(ColumnDef::new(Tour::PriceBaby).double().null())
                    .col(
                        ColumnDef::new(Tour::Status)
                            .string_len(16)
                            .not_null()
                            .default("draft"),
                    )
                    .col(
                        ColumnDef::new(Tour::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Tour::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tour_agency")
                            .from(Tour::Table, Tour::AgencyId)
                            .to(Agency::Table, Agency::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tour_country")
                            .from(Tour::Table, Tour::CountryId)
                            .to(Country::Table, Country::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tour_city")
                            .from(Tour::Table, Tour::CityId)
                            .to(City::Table, City::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tour_service")
                            .from(Tour::Table, Tour::ServiceId)
                            .to(Service::Table, Service::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tour_agency_id")
                    .table(Tour::Table)
                    .col(Tour::AgencyId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tour_status")
                    .table(Tour::Table)
                    .col(Tour::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tour_created_at")
                    .table(Tour::Table)
                    .col(Tour::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Create tour_gallery table
        manager
            .create_table(
                Table::create()
                    .table(TourGallery::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TourGallery::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TourGallery::TourId).string().not_null())
                    .col(ColumnDef::new(TourGallery::PublicId).string().not_null())
                    .col(ColumnDef::new(TourGallery::ImageUrl).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tour_gallery_tour")
                            .from(TourGallery::Table, TourGallery::TourId)
                            .to(Tour::Table, Tour::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tour_gallery_tour_id")
                    .table(TourGallery::Table)
                    .col(TourGallery::TourId)
                    .to_owned(),
            )
            .await?;

        // Create tour_schedule table
        manager
            .create_table(
                Table::create()
                    .table(TourSchedule::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TourSchedule::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TourSchedule::TourId).string().not_null())
                    .col(ColumnDef::new(TourSchedule::DayNumber).integer().not_null())
                    .col(ColumnDef::new(TourSchedule::Summary).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tour_schedule_tour")
                            .from(TourSchedule::Table, TourSchedule::TourId)
                            .to(Tour::Table, Tour::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Day numbers are unique within a tour
        manager
            .create_index(
                Index::create()
                    .name("idx_tour_schedule_unique_day")
                    .table(TourSchedule::Table)
                    .col(TourSchedule::TourId)
                    .col(TourSchedule::DayNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create schedule_activity table
        manager
            .create_table(
                Table::create()
                    .table(ScheduleActivity::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScheduleActivity::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ScheduleActivity::ScheduleId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ScheduleActivity::StartTime)
                            .string_len(8)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ScheduleActivity::Activity).text().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_schedule_activity_schedule")
                            .from(ScheduleActivity::Table, ScheduleActivity::ScheduleId)
                            .to(TourSchedule::Table, TourSchedule::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_schedule_activity_schedule_id")
                    .table(ScheduleActivity::Table)
                    .col(ScheduleActivity::ScheduleId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ScheduleActivity::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TourSchedule::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TourGallery::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tour::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Tour {
    Table,
    Id,
    AgencyId,
    TourName,
    CountryId,
    CityId,
    ServiceId,
    Itinerary,
    Duration,
    DepartureDate,
    DeparturePlace,
    PublicId,
    CoverPhoto,
    Description,
    PriceAdult,
    PriceChild,
    PriceBaby,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum TourGallery {
    Table,
    Id,
    TourId,
    PublicId,
    ImageUrl,
}

#[derive(Iden)]
enum TourSchedule {
    Table,
    Id,
    TourId,
    DayNumber,
    Summary,
}

#[derive(Iden)]
enum ScheduleActivity {
    Table,
    Id,
    ScheduleId,
    StartTime,
    Activity,
}

#[derive(Iden)]
enum Agency {
    Table,
    Id,
}

#[derive(Iden)]
enum Country {
    Table,
    Id,
}

#[derive(Iden)]
enum City {
    Table,
    Id,
}

#[derive(Iden)]
enum Service {
    Table,
    Id,
}
