//! Fingerprint credential entity for database

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Credential model — one enrolled fingerprint per row
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "credentials")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub user_id: i32,

    /// Opaque template identifier from the enrollment ceremony.
    /// Globally unique: a template id belongs to exactly one user.
    #[sea_orm(unique)]
    pub template_id: String,

    /// Opaque credential-type marker (e.g. "fingerprint")
    pub credential_type: String,

    pub created_at: DateTimeUtc,
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
