//! System settings entity — global configuration singleton

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Settings model. Exactly one row exists; the settings repository
/// creates the default lazily on first read.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "system_settings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub auto_toggle_enabled: bool,

    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
