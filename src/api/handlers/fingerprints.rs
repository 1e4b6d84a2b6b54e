//! Fingerprint verification and enrollment handlers
//!
//! `verify_scan` is the kiosk-facing endpoint: the scanner resolves a
//! local match to an opaque template id and posts it here. Credential
//! resolution happens in this handler; the decision itself (sign-in vs
//! sign-out, daily limit) is the attendance engine's job.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::dto::{domain_error_response, ErrorResponse, ValidatedJson};
use crate::api::handlers::users::UserDto;
use crate::application::{AttendanceEngine, ScanOutcome};
use crate::domain::{AttendanceAction, Credential, DomainError, NewCredential, RepositoryProvider};

/// State for fingerprint handlers
#[derive(Clone)]
pub struct FingerprintHandlerState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub engine: Arc<AttendanceEngine>,
}

/// Scan verification request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({ "templateId": "fp_alice_001" }))]
pub struct VerifyScanRequest {
    /// Opaque template id produced by the scanner's local match
    #[validate(length(min = 1, message = "must not be empty"))]
    pub template_id: String,
}

/// Accepted scan response
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyScanResponse {
    /// e.g. "Successfully Signed In"
    pub message: String,
    pub user: UserDto,
    /// `SIGN_IN` or `SIGN_OUT`
    pub action: String,
}

/// Credential enrollment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({ "userId": 1, "templateId": "fp_alice_001" }))]
pub struct RegisterCredentialRequest {
    pub user_id: i32,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub template_id: String,
    /// Opaque credential-type marker; defaults to "fingerprint"
    pub credential_type: Option<String>,
}

/// Enrolled credential representation
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CredentialDto {
    pub id: i32,
    pub user_id: i32,
    pub template_id: String,
    pub credential_type: String,
    pub created_at: DateTime<Utc>,
}

impl From<Credential> for CredentialDto {
    fn from(c: Credential) -> Self {
        Self {
            id: c.id,
            user_id: c.user_id,
            template_id: c.template_id,
            credential_type: c.credential_type,
            created_at: c.created_at,
        }
    }
}

fn success_message(action: AttendanceAction) -> String {
    match action {
        AttendanceAction::SignIn => "Successfully Signed In".to_string(),
        AttendanceAction::SignOut => "Successfully Signed Out".to_string(),
    }
}

/// Verify a fingerprint scan and record attendance
///
/// Resolves the template id to a user, then lets the attendance engine
/// decide the direction (sign-in/sign-out) and apply the daily limit.
/// A duplicate for the day answers 400 with `alreadyRecorded: true` and
/// writes nothing.
#[utoipa::path(
    post,
    path = "/api/v1/fingerprint/verify",
    tag = "Fingerprints",
    request_body = VerifyScanRequest,
    responses(
        (status = 200, description = "Attendance recorded", body = VerifyScanResponse),
        (status = 400, description = "Already signed in/out today (`alreadyRecorded: true`)", body = ErrorResponse),
        (status = 404, description = "Fingerprint not recognized", body = ErrorResponse)
    )
)]
pub async fn verify_scan(
    State(state): State<FingerprintHandlerState>,
    ValidatedJson(request): ValidatedJson<VerifyScanRequest>,
) -> Result<Json<VerifyScanResponse>, (StatusCode, Json<ErrorResponse>)> {
    let credential = state
        .repos
        .credentials()
        .find_by_template_id(&request.template_id)
        .await
        .map_err(domain_error_response)?;

    let Some(credential) = credential else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Fingerprint not recognized")),
        ));
    };

    match state.engine.record_scan_event(credential.user_id).await {
        Ok(ScanOutcome::Accepted { user, action, .. }) => Ok(Json(VerifyScanResponse {
            message: success_message(action),
            user: UserDto::from(user),
            action: action.as_str().to_string(),
        })),
        Ok(ScanOutcome::AlreadyRecorded { message, .. }) => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::already_recorded(message)),
        )),
        // Credential pointing at a deleted user
        Err(DomainError::NotFound { .. }) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("User not found for this fingerprint")),
        )),
        Err(e) => Err(domain_error_response(e)),
    }
}

/// Enroll a fingerprint credential for a roster user
///
/// The template id must be globally unique: enrolling a template that
/// any user already holds is rejected.
#[utoipa::path(
    post,
    path = "/api/v1/fingerprint/register",
    tag = "Fingerprints",
    security(("bearer_auth" = [])),
    request_body = RegisterCredentialRequest,
    responses(
        (status = 201, description = "Credential enrolled", body = CredentialDto),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Template already enrolled")
    )
)]
pub async fn register_credential(
    State(state): State<FingerprintHandlerState>,
    ValidatedJson(request): ValidatedJson<RegisterCredentialRequest>,
) -> Result<(StatusCode, Json<CredentialDto>), (StatusCode, Json<ErrorResponse>)> {
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
        .credentials()
        .create(NewCredential {
            user_id: request.user_id,
            template_id: request.template_id,
            credential_type: request.credential_type,
        })
        .await
        .map_err(domain_error_response)?;

    Ok((StatusCode::CREATED, Json(CredentialDto::from(created))))
}
