//! Settings repository interface

use async_trait::async_trait;

use super::model::{SettingsUpdate, SystemSettings};
use crate::domain::DomainResult;

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Fetch the singleton settings row, inserting the default
    /// (auto-toggle enabled) when none exists yet.
    async fn get_or_create(&self) -> DomainResult<SystemSettings>;

    /// Apply a partial update and return the new state.
    async fn update(&self, update: SettingsUpdate) -> DomainResult<SystemSettings>;
}
