//! Common API DTOs and extractors

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::DomainError;

/// Error body returned by every endpoint.
///
/// `alreadyRecorded` is set only on the scan endpoint's daily-duplicate
/// rejection, so kiosk clients can show the specific "already signed
/// in/out" message instead of a generic error.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Human-readable description
    pub message: String,
    /// `true` when the daily limit declined an otherwise valid scan
    #[serde(skip_serializing_if = "Option::is_none")]
    pub already_recorded: Option<bool>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            already_recorded: None,
        }
    }

    pub fn already_recorded(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            already_recorded: Some(true),
        }
    }
}

/// Map a domain error to its HTTP representation.
///
/// `Validation` errors carrying a database failure become 500s; every
/// other variant keeps its business meaning.
pub fn domain_error_response(error: DomainError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &error {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        DomainError::Validation(msg) if msg.starts_with("Database error:") => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
    };
    (status, Json(ErrorResponse::new(error.to_string())))
}

/// An extractor that deserializes JSON and validates it.
///
/// Works like `axum::Json<T>`, but additionally runs
/// `validator::Validate::validate()` on the deserialized value and
/// answers malformed input with a structured error body.
pub struct ValidatedJson<T>(pub T);

/// Error type for `ValidatedJson` extraction failures.
pub enum ValidatedJsonRejection {
    /// JSON parsing failed.
    JsonError(JsonRejection),
    /// Validation failed.
    ValidationError(validator::ValidationErrors),
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        match self {
            Self::JsonError(rejection) => {
                let body = ErrorResponse::new(format!("Invalid JSON: {}", rejection));
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            Self::ValidationError(errors) => {
                let field_errors: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errs)| {
                        errs.iter().map(move |e| {
                            let msg = e
                                .message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| format!("{:?}", e.code));
                            format!("{}: {}", field, msg)
                        })
                    })
                    .collect();

                let message = if field_errors.is_empty() {
                    "Validation failed".to_string()
                } else {
                    field_errors.join("; ")
                };

                let body = ErrorResponse::new(message);
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
        }
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: axum::extract::Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::JsonError)?;

        value
            .validate()
            .map_err(ValidatedJsonRejection::ValidationError)?;

        Ok(ValidatedJson(value))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn already_recorded_flag_serializes_only_when_set() {
        let plain = serde_json::to_value(ErrorResponse::new("nope")).unwrap();
        assert!(plain.get("alreadyRecorded").is_none());

        let flagged =
            serde_json::to_value(ErrorResponse::already_recorded("already signed in")).unwrap();
        assert_eq!(flagged["alreadyRecorded"], true);
    }

    #[test]
    fn database_errors_map_to_internal() {
        let (status, _) = domain_error_response(DomainError::Validation(
            "Database error: connection closed".into(),
        ));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let (status, _) =
            domain_error_response(DomainError::Validation("missing field".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let (status, _) = domain_error_response(DomainError::NotFound {
            entity: "User",
            field: "id",
            value: "7".into(),
        });
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
