//! Roster user entity for database

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Tracked-person category
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum UserCategory {
    #[sea_orm(string_value = "student")]
    Student,
    #[sea_orm(string_value = "staff")]
    Staff,
}

impl Default for UserCategory {
    fn default() -> Self {
        Self::Student
    }
}

/// Roster user model — a person tracked for attendance
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub full_name: String,

    pub category: UserCategory,

    /// Optional, unique across the roster
    #[sea_orm(unique, nullable)]
    pub email: Option<String>,

    // Scheduling metadata, informational only

    #[sea_orm(nullable)]
    pub course_name: Option<String>,

    #[sea_orm(nullable)]
    pub duration: Option<String>,

    #[sea_orm(nullable)]
    pub frequency: Option<i32>,

    /// Comma-separated weekdays (e.g. "Mon,Wed,Fri")
    #[sea_orm(nullable)]
    pub days_of_week: Option<String>,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::credential::Entity")]
    Credentials,

    #[sea_orm(has_many = "super::attendance_event::Entity")]
    AttendanceEvents,
}

impl Related<super::credential::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Credentials.def()
    }
}

impl Related<super::attendance_event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendanceEvents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
