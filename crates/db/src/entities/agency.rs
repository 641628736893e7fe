//! Agency entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Travel agency profile. One per owning user account.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "agency")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(unique)]
    pub user_id: String,

    pub company_name: String,

    pub license_number: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub address: String,

    #[sea_orm(nullable)]
    pub website: Option<String>,

    pub employee_count: i32,

    pub established_year: i32,

    /// Specialty tags, stored as a JSON string array.
    #[sea_orm(column_type = "JsonBinary")]
    pub specialties: Json,

    /// Served areas, stored as a JSON string array.
    #[sea_orm(column_type = "JsonBinary")]
    pub service_areas: Json,

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
    #[sea_orm(has_many = "super::tour::Entity")]
    Tours,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::tour::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tours.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
