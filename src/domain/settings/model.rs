//! System settings domain entity

use chrono::{DateTime, Utc};

/// Global configuration singleton.
///
/// Exactly one row exists; the settings store lazily creates the default
/// on first read.
#[derive(Debug, Clone)]
pub struct SystemSettings {
    pub id: i32,
    /// When enabled, successive scans alternate sign-in / sign-out.
    /// When disabled, every scan is a sign-in candidate.
    pub auto_toggle_enabled: bool,
    pub updated_at: DateTime<Utc>,
}

/// Partial update for settings; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct SettingsUpdate {
    pub auto_toggle_enabled: Option<bool>,
}
