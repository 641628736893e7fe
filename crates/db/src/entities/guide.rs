//! Guide entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Independent guide profile. One per owning user account.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "guide")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(unique)]
    pub user_id: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    #[sea_orm(default_value = 0)]
    pub experience_years: i32,

    /// Spoken languages, stored as a JSON string array.
    #[sea_orm(column_type = "JsonBinary")]
    pub languages: Json,

    /// Specialty tags, stored as a JSON string array.
    #[sea_orm(column_type = "JsonBinary")]
    pub specialties: Json,

    pub price_per_day: f64,

    /// `available` or `unavailable`.
    pub availability: String,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
