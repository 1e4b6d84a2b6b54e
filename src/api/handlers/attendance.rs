//! Attendance ledger handlers: listings, manual entries, daily stats

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::dto::{domain_error_response, ErrorResponse};
use crate::api::handlers::users::UserDto;
use crate::domain::{
    AttendanceAction, AttendanceEvent, AttendanceSource, DailyStats, EventFilter,
    NewAttendanceEvent, RepositoryProvider, User,
};

/// State for attendance handlers
#[derive(Clone)]
pub struct AttendanceHandlerState {
    pub repos: Arc<dyn RepositoryProvider>,
}

/// Ledger entry representation
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEventDto {
    pub id: i32,
    pub user_id: i32,
    /// `SIGN_IN` or `SIGN_OUT`
    pub action: String,
    pub timestamp: DateTime<Utc>,
    /// `fingerprint` or `manual`
    pub source: String,
}

impl From<AttendanceEvent> for AttendanceEventDto {
    fn from(e: AttendanceEvent) -> Self {
        Self {
            id: e.id,
            user_id: e.user_id,
            action: e.action.as_str().to_string(),
            timestamp: e.timestamp,
            source: e.source.as_str().to_string(),
        }
    }
}

/// Ledger entry with its owning user, as returned by listings
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceLogDto {
    #[serde(flatten)]
    pub event: AttendanceEventDto,
    pub user: UserDto,
}

impl From<(AttendanceEvent, User)> for AttendanceLogDto {
    fn from((event, user): (AttendanceEvent, User)) -> Self {
        Self {
            event: AttendanceEventDto::from(event),
            user: UserDto::from(user),
        }
    }
}

/// Filter parameters for ledger listings
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListEventsParams {
    /// Restrict to one user
    pub user_id: Option<i32>,
    /// Restrict to one calendar day (YYYY-MM-DD, server-local)
    pub date: Option<String>,
}

/// Manual ledger entry request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({ "userId": 1, "action": "SIGN_IN", "source": "manual" }))]
pub struct CreateEventRequest {
    pub user_id: i32,
    /// `SIGN_IN` or `SIGN_OUT`
    pub action: String,
    /// `fingerprint` or `manual`; defaults to `manual`
    pub source: Option<String>,
}

/// Daily presence counts
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyStatsDto {
    pub total_present: u32,
    pub active_students: u32,
    pub active_staff: u32,
}

impl From<DailyStats> for DailyStatsDto {
    fn from(s: DailyStats) -> Self {
        Self {
            total_present: s.total_present,
            active_students: s.active_students,
            active_staff: s.active_staff,
        }
    }
}

/// List attendance logs
///
/// Newest first, joined with the owning user. Entries of deleted users
/// are kept in the ledger but omitted here.
#[utoipa::path(
    get,
    path = "/api/v1/attendance/logs",
    tag = "Attendance",
    security(("bearer_auth" = [])),
    params(ListEventsParams),
    responses(
        (status = 200, description = "Ledger entries", body = Vec<AttendanceLogDto>),
        (status = 400, description = "Malformed date filter"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_logs(
    State(state): State<AttendanceHandlerState>,
    Query(params): Query<ListEventsParams>,
) -> Result<Json<Vec<AttendanceLogDto>>, (StatusCode, Json<ErrorResponse>)> {
    let date = match &params.date {
        Some(raw) => Some(NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("Date must be YYYY-MM-DD")),
            )
        })?),
        None => None,
    };

    let rows = state
        .repos
        .attendance()
        .list_events(EventFilter {
            user_id: params.user_id,
            date,
        })
        .await
        .map_err(domain_error_response)?;

    Ok(Json(rows.into_iter().map(AttendanceLogDto::from).collect()))
}

/// Record a manual ledger entry
///
/// Administrative override for missed scans. The once-per-kind-per-day
/// rule still applies: a duplicate answers 409.
#[utoipa::path(
    post,
    path = "/api/v1/attendance/logs",
    tag = "Attendance",
    security(("bearer_auth" = [])),
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Entry recorded", body = AttendanceEventDto),
        (status = 400, description = "Unknown action or source"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Already recorded for this day")
    )
)]
pub async fn create_log(
    State(state): State<AttendanceHandlerState>,
    Json(request): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<AttendanceEventDto>), (StatusCode, Json<ErrorResponse>)> {
    let Some(action) = AttendanceAction::from_str(&request.action) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Action must be SIGN_IN or SIGN_OUT")),
        ));
    };

    let source = match &request.source {
        Some(raw) => AttendanceSource::from_str(raw).ok_or((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Source must be fingerprint or manual")),
        ))?,
        None => AttendanceSource::Manual,
    };

    let user = state
        .repos
        .users()
        .find_by_id(request.user_id)
        .await
        .map_err(domain_error_response)?;
    if user.is_none() {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("User not found")),
        ));
    }

    let created = state
        .repos
        .attendance()
        .append_event(NewAttendanceEvent {
            user_id: request.user_id,
            action,
            source,
        })
        .await
        .map_err(domain_error_response)?;

    Ok((StatusCode::CREATED, Json(AttendanceEventDto::from(created))))
}

/// Today's presence counts
///
/// A user is present when today holds a sign-in for them and no
/// sign-out.
#[utoipa::path(
    get,
    path = "/api/v1/attendance/stats",
    tag = "Attendance",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Presence counts", body = DailyStatsDto),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn daily_stats(
    State(state): State<AttendanceHandlerState>,
) -> Result<Json<DailyStatsDto>, (StatusCode, Json<ErrorResponse>)> {
    let today = Local::now().date_naive();
    let stats = state
        .repos
        .attendance()
        .daily_stats(today)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(DailyStatsDto::from(stats)))
}
