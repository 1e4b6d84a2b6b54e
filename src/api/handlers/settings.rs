//! System settings handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::dto::{domain_error_response, ErrorResponse};
use crate::domain::{RepositoryProvider, SettingsUpdate, SystemSettings};

/// State for settings handlers
#[derive(Clone)]
pub struct SettingsHandlerState {
    pub repos: Arc<dyn RepositoryProvider>,
}

/// Settings API representation
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SettingsDto {
    pub auto_toggle_enabled: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<SystemSettings> for SettingsDto {
    fn from(s: SystemSettings) -> Self {
        Self {
            auto_toggle_enabled: s.auto_toggle_enabled,
            updated_at: s.updated_at,
        }
    }
}

/// Partial settings update; omitted fields are left unchanged
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({ "autoToggleEnabled": false }))]
pub struct UpdateSettingsRequest {
    pub auto_toggle_enabled: Option<bool>,
}

/// Read the global settings
///
/// Creates the default row (auto-toggle enabled) on first read.
#[utoipa::path(
    get,
    path = "/api/v1/settings",
    tag = "Settings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current settings", body = SettingsDto),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_settings(
    State(state): State<SettingsHandlerState>,
) -> Result<Json<SettingsDto>, (StatusCode, Json<ErrorResponse>)> {
    let settings = state
        .repos
        .settings()
        .get_or_create()
        .await
        .map_err(domain_error_response)?;
    Ok(Json(SettingsDto::from(settings)))
}

/// Update the global settings
///
/// Takes effect on the very next scan: the engine reads settings per
/// invocation and never caches them.
#[utoipa::path(
    put,
    path = "/api/v1/settings",
    tag = "Settings",
    security(("bearer_auth" = [])),
    request_body = UpdateSettingsRequest,
    responses(
        (status = 200, description = "Updated settings", body = SettingsDto),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn update_settings(
    State(state): State<SettingsHandlerState>,
    Json(request): Json<UpdateSettingsRequest>,
) -> Result<Json<SettingsDto>, (StatusCode, Json<ErrorResponse>)> {
    let updated = state
        .repos
        .settings()
        .update(SettingsUpdate {
            auto_toggle_enabled: request.auto_toggle_enabled,
        })
        .await
        .map_err(domain_error_response)?;
    Ok(Json(SettingsDto::from(updated)))
}
