//! Authentication API handlers for administrator accounts

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::dto::{ErrorResponse, ValidatedJson};
use crate::auth::{create_token, hash_password, verify_password, AuthenticatedAdmin, JwtConfig};
use crate::infrastructure::database::entities::admin_account;

/// State for authentication handlers
#[derive(Clone)]
pub struct AuthHandlerState {
    pub db: sea_orm::DatabaseConnection,
    pub jwt_config: JwtConfig,
}

/// Login request
#[derive(Debug, Deserialize, ToSchema)]
#[schema(example = json!({
    "username": "admin",
    "password": "secret123"
}))]
pub struct LoginRequest {
    /// Username or email
    pub username: String,
    pub password: String,
}

/// Successful login response
///
/// Pass the token in the `Authorization: Bearer <token>` header on
/// subsequent requests.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    /// Always `Bearer`
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
    pub account: AdminInfo,
}

/// Administrator account information
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminInfo {
    pub id: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
}

impl From<admin_account::Model> for AdminInfo {
    fn from(a: admin_account::Model) -> Self {
        Self {
            id: a.id,
            username: a.username,
            email: a.email,
            full_name: a.full_name,
            role: a.role,
        }
    }
}

/// Registration request for a new administrator account
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "username": "frontdesk",
    "email": "frontdesk@example.com",
    "password": "secure_password_123",
    "fullName": "Front Desk"
}))]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50, message = "must be 3-50 characters"))]
    pub username: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "must be at least 8 characters"))]
    pub password: String,
    #[validate(length(min = 1, max = 120, message = "must be 1-120 characters"))]
    pub full_name: String,
}

/// Password change request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    /// Current password for confirmation
    pub current_password: String,
    #[validate(length(min = 8, message = "must be at least 8 characters"))]
    pub new_password: String,
}

fn internal_error(e: impl std::fmt::Display) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(e.to_string())),
    )
}

/// Log in as an administrator
///
/// Accepts either username or email in the `username` field and returns
/// a JWT on success. A deactivated account answers 401.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials or account disabled")
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, (StatusCode, Json<ErrorResponse>)> {
    // Find account by username or email
    let account = admin_account::Entity::find()
        .filter(
            admin_account::Column::Username
                .eq(&request.username)
                .or(admin_account::Column::Email.eq(&request.username)),
        )
        .one(&state.db)
        .await
        .map_err(internal_error)?;

    let Some(account) = account else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("Invalid credentials")),
        ));
    };

    if !account.is_active {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("Account is disabled")),
        ));
    }

    let password_valid =
        verify_password(&request.password, &account.password_hash).unwrap_or(false);
    if !password_valid {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("Invalid credentials")),
        ));
    }

    // Update last login time
    let mut active: admin_account::ActiveModel = account.clone().into();
    active.last_login_at = Set(Some(Utc::now()));
    active.update(&state.db).await.ok();

    let token = create_token(
        &account.id,
        &account.username,
        &account.role,
        &state.jwt_config,
    )
    .map_err(internal_error)?;

    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt_config.expiration_hours * 3600,
        account: AdminInfo::from(account),
    }))
}

/// Register a new administrator account
///
/// Username and email must be unique. New accounts get the `admin` role.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AdminInfo),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username or email already exists")
    )
)]
pub async fn register(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AdminInfo>), (StatusCode, Json<ErrorResponse>)> {
    // Check uniqueness of username and email
    let existing = admin_account::Entity::find()
        .filter(
            admin_account::Column::Username
                .eq(&request.username)
                .or(admin_account::Column::Email.eq(&request.email)),
        )
        .one(&state.db)
        .await
        .map_err(internal_error)?;

    if existing.is_some() {
        return Err((
            StatusCode::CONFLICT,
            Json(ErrorResponse::new("Username or email already exists")),
        ));
    }

    let password_hash = hash_password(&request.password).map_err(internal_error)?;

    let now = Utc::now();
    let account_id = uuid::Uuid::new_v4().to_string();

    let new_account = admin_account::ActiveModel {
        id: Set(account_id.clone()),
        username: Set(request.username.clone()),
        email: Set(request.email.clone()),
        password_hash: Set(password_hash),
        full_name: Set(request.full_name.clone()),
        role: Set("admin".to_string()),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        last_login_at: Set(None),
    };

    let created = new_account.insert(&state.db).await.map_err(internal_error)?;

    Ok((StatusCode::CREATED, Json(AdminInfo::from(created))))
}

/// Current administrator information
///
/// Returns the account behind the presented JWT.
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current account", body = AdminInfo),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_current_admin(
    State(state): State<AuthHandlerState>,
    admin: Option<axum::Extension<AuthenticatedAdmin>>,
) -> Result<Json<AdminInfo>, (StatusCode, Json<ErrorResponse>)> {
    let Some(admin) = admin else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("Not authenticated")),
        ));
    };

    let account = admin_account::Entity::find_by_id(&admin.account_id)
        .one(&state.db)
        .await
        .map_err(internal_error)?;

    let Some(account) = account else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Account not found")),
        ));
    };

    Ok(Json(AdminInfo::from(account)))
}

/// Change the current administrator's password
///
/// Requires the current password for confirmation.
#[utoipa::path(
    put,
    path = "/api/v1/auth/change-password",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    request_body = ChangePasswordRequest,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "New password too short"),
        (status = 401, description = "Wrong current password or not authenticated")
    )
)]
pub async fn change_password(
    State(state): State<AuthHandlerState>,
    admin: Option<axum::Extension<AuthenticatedAdmin>>,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    let Some(admin) = admin else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("Not authenticated")),
        ));
    };

    let account = admin_account::Entity::find_by_id(&admin.account_id)
        .one(&state.db)
        .await
        .map_err(internal_error)?;

    let Some(account) = account else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Account not found")),
        ));
    };

    let password_valid =
        verify_password(&request.current_password, &account.password_hash).unwrap_or(false);
    if !password_valid {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("Invalid current password")),
        ));
    }

    let new_hash = hash_password(&request.new_password).map_err(internal_error)?;

    let mut active: admin_account::ActiveModel = account.into();
    active.password_hash = Set(new_hash);
    active.updated_at = Set(Utc::now());
    active.update(&state.db).await.map_err(internal_error)?;

    Ok(StatusCode::NO_CONTENT)
}
