//! SeaORM implementation of SettingsRepository

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, EntityTrait, Set};

use crate::domain::settings::{SettingsRepository, SettingsUpdate, SystemSettings};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::settings;

pub struct SeaOrmSettingsRepository {
    db: DatabaseConnection,
}

impl SeaOrmSettingsRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(s: settings::Model) -> SystemSettings {
    SystemSettings {
        id: s.id,
        auto_toggle_enabled: s.auto_toggle_enabled,
        updated_at: s.updated_at,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Validation(format!("Database error: {}", e))
}

// ── SettingsRepository impl ─────────────────────────────────────

#[async_trait]
impl SettingsRepository for SeaOrmSettingsRepository {
    async fn get_or_create(&self) -> DomainResult<SystemSettings> {
        let existing = settings::Entity::find()
            .one(&self.db)
            .await
            .map_err(db_err)?;

        if let Some(model) = existing {
            return Ok(model_to_domain(model));
        }

        debug!("No settings row found, inserting defaults");
        let model = settings::ActiveModel {
            id: NotSet,
            auto_toggle_enabled: Set(true),
            updated_at: Set(Utc::now()),
        };
        let created = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(created))
    }

    async fn update(&self, update: SettingsUpdate) -> DomainResult<SystemSettings> {
        let current = self.get_or_create().await?;

        let mut active = settings::ActiveModel {
            id: Set(current.id),
            auto_toggle_enabled: Set(current.auto_toggle_enabled),
            updated_at: Set(Utc::now()),
        };
        if let Some(enabled) = update.auto_toggle_enabled {
            active.auto_toggle_enabled = Set(enabled);
        }

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(updated))
    }
}
