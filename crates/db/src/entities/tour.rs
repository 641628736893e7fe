//! Tour entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A tour listing. Owned by exactly one agency; galleries and day
/// schedules hang off it in their own tables.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tour")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(indexed)]
    pub agency_id: String,

    pub tour_name: String,

    #[sea_orm(indexed)]
    pub country_id: String,

    #[sea_orm(indexed)]
    pub city_id: String,

    pub service_id: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub itinerary: Option<String>,

    /// Human-readable duration, e.g. "3 days 2 nights".
    #[sea_orm(nullable)]
    pub duration: Option<String>,

    #[sea_orm(nullable)]
    pub departure_date: Option<Date>,

    #[sea_orm(nullable)]
    pub departure_place: Option<String>,

    /// External-media identifier of the cover photo.
    #[sea_orm(nullable)]
    pub public_id: Option<String>,

    /// Cover photo URL.
    #[sea_orm(nullable)]
    pub cover_photo: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    #[sea_orm(nullable)]
    pub price_adult: Option<f64>,

    #[sea_orm(nullable)]
    pub price_child: Option<f64>,

    #[sea_orm(nullable)]
    pub price_baby: Option<f64>,

    /// `active`, `inactive` or `draft`.
    pub status: String,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::agency::Entity",
        from = "Column::AgencyId",
        to = "super::agency::Column::Id",
        on_delete = "Cascade"
    )]
    Agency,
    #[sea_orm(
        belongs_to = "super::country::Entity",
        from = "Column::CountryId",
        to = "super::country::Column::Id"
    )]
    Country,
    #[sea_orm(
        belongs_to = "super::city::Entity",
        from = "Column::CityId",
        to = "super::city::Column::Id"
    )]
    City,
    #[sea_orm(
        belongs_to = "super::service::Entity",
        from = "Column::ServiceId",
        to = "super::service::Column::Id"
    )]
    Service,
    #[sea_orm(has_many = "super::tour_gallery::Entity")]
    Galleries,
    #[sea_orm(has_many = "super::tour_schedule::Entity")]
    Schedules,
    #[sea_orm(has_many = "super::booking::Entity")]
    Bookings,
}

impl Related<super::agency::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Agency.def()
    }
}

impl Related<super::tour_gallery::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Galleries.def()
    }
}

impl Related<super::tour_schedule::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Schedules.def()
    }
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
