//! Schedule activity entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A timed activity within a schedule day. `start_time` holds "HH:MM",
/// so lexicographic order is chronological order.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "schedule_activity")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(indexed)]
    pub schedule_id: String,

    pub start_time: String,

    #[sea_orm(column_type = "Text")]
    pub activity: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tour_schedule::Entity",
        from = "Column::ScheduleId",
        to = "super::tour_schedule::Column::Id",
        on_delete = "Cascade"
    )]
    Schedule,
}

impl Related<super::tour_schedule::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Schedule.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
