//! Roster user management handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::dto::{domain_error_response, ErrorResponse, ValidatedJson};
use crate::domain::{NewUser, RepositoryProvider, User, UserCategory};

/// State for user handlers
#[derive(Clone)]
pub struct UsersHandlerState {
    pub repos: Arc<dyn RepositoryProvider>,
}

/// Roster user API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i32,
    pub full_name: String,
    /// `student` or `staff`
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_of_week: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            full_name: u.full_name,
            category: u.category.as_str().to_string(),
            email: u.email,
            course_name: u.course_name,
            duration: u.duration,
            frequency: u.frequency,
            days_of_week: u.days_of_week,
            created_at: u.created_at,
        }
    }
}

/// Create user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "fullName": "Alice Student",
    "category": "student",
    "email": "alice@school.edu",
    "courseName": "Mathematics",
    "duration": "3 months",
    "frequency": 2,
    "daysOfWeek": "Mon,Wed"
}))]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 120, message = "must be 1-120 characters"))]
    pub full_name: String,
    /// `student` or `staff`
    pub category: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    pub course_name: Option<String>,
    pub duration: Option<String>,
    pub frequency: Option<i32>,
    /// Comma-separated weekdays (e.g. "Mon,Wed,Fri")
    pub days_of_week: Option<String>,
}

/// List all roster users
///
/// Returns every tracked student and staff member, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All roster users", body = Vec<UserDto>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_users(
    State(state): State<UsersHandlerState>,
) -> Result<Json<Vec<UserDto>>, (StatusCode, Json<ErrorResponse>)> {
    let users = state
        .repos
        .users()
        .find_all()
        .await
        .map_err(domain_error_response)?;
    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}

/// Get a roster user by ID
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User details", body = UserDto),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<UsersHandlerState>,
    Path(id): Path<i32>,
) -> Result<Json<UserDto>, (StatusCode, Json<ErrorResponse>)> {
    let user = state
        .repos
        .users()
        .find_by_id(id)
        .await
        .map_err(domain_error_response)?;

    match user {
        Some(u) => Ok(Json(UserDto::from(u))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("User not found")),
        )),
    }
}

/// Register a new roster user
///
/// The scheduling fields (course, duration, frequency, days of week) are
/// informational: the attendance engine never consults them.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserDto),
        (status = 400, description = "Validation error (empty name, bad email, unknown category)"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn create_user(
    State(state): State<UsersHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserDto>), (StatusCode, Json<ErrorResponse>)> {
    let Some(category) = UserCategory::from_str(&request.category) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Category must be 'student' or 'staff'")),
        ));
    };

    let created = state
        .repos
        .users()
        .create(NewUser {
            full_name: request.full_name,
            category,
            email: request.email,
            course_name: request.course_name,
            duration: request.duration,
            frequency: request.frequency,
            days_of_week: request.days_of_week,
        })
        .await
        .map_err(domain_error_response)?;

    Ok((StatusCode::CREATED, Json(UserDto::from(created))))
}

/// Delete a roster user
///
/// Credentials are removed with the user; attendance history is kept
/// for audit.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<UsersHandlerState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    state
        .repos
        .users()
        .delete(id)
        .await
        .map_err(domain_error_response)?;
    Ok(StatusCode::NO_CONTENT)
}
