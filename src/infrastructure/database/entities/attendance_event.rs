//! Attendance event entity — one row per accepted scan or manual entry

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Attendance event model. The table is append-only: rows are never
/// updated or deleted, and a unique index over
/// (user_id, action, recorded_on) enforces the daily limit.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "attendance_events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Owning user. Deliberately not a foreign key: deleting a user
    /// keeps their ledger rows for audit.
    pub user_id: i32,

    /// "SIGN_IN" | "SIGN_OUT"
    pub action: String,

    pub timestamp: DateTimeUtc,

    /// Server-local calendar day of `timestamp`
    pub recorded_on: Date,

    /// "fingerprint" | "manual"
    pub source: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
