//! User entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User account - travelers, guides, agency owners and admins.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(unique)]
    pub email: String,

    /// Argon2 hash of the password. Never serialized into responses.
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub full_name: String,

    #[sea_orm(nullable)]
    pub phone_number: Option<String>,

    /// Avatar URL
    #[sea_orm(nullable)]
    pub avatar_url: Option<String>,

    /// Account role: `user`, `guide`, `agency` or `admin`.
    pub role: String,

    #[sea_orm(default_value = false)]
    pub email_verified: bool,

    /// SHA-256 of the currently outstanding password-reset token, if any.
    #[sea_orm(nullable)]
    #[serde(skip_serializing)]
    pub reset_token_hash: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::agency::Entity")]
    Agency,

    #[sea_orm(has_one = "super::guide::Entity")]
    Guide,

    #[sea_orm(has_many = "super::booking::Entity")]
    Bookings,
}

impl Related<super::agency::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Agency.def()
    }
}

impl Related<super::guide::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Guide.def()
    }
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
