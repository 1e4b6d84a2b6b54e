//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::AttendanceEngine;
use crate::auth::{auth_middleware, AuthState, JwtConfig};
use crate::domain::RepositoryProvider;

use super::dto::ErrorResponse;
use super::handlers::{attendance, auth, fingerprints, health, settings, users};

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Auth
        auth::login,
        auth::register,
        auth::get_current_admin,
        auth::change_password,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::delete_user,
        // Fingerprints
        fingerprints::verify_scan,
        fingerprints::register_credential,
        // Attendance
        attendance::list_logs,
        attendance::create_log,
        attendance::daily_stats,
        // Settings
        settings::get_settings,
        settings::update_settings,
    ),
    components(
        schemas(
            // Common
            ErrorResponse,
            health::HealthResponse,
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::RegisterRequest,
            auth::AdminInfo,
            auth::ChangePasswordRequest,
            // Users
            users::UserDto,
            users::CreateUserRequest,
            // Fingerprints
            fingerprints::VerifyScanRequest,
            fingerprints::VerifyScanResponse,
            fingerprints::RegisterCredentialRequest,
            fingerprints::CredentialDto,
            // Attendance
            attendance::AttendanceEventDto,
            attendance::AttendanceLogDto,
            attendance::CreateEventRequest,
            attendance::DailyStatsDto,
            // Settings
            settings::SettingsDto,
            settings::UpdateSettingsRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Authentication", description = "Administrator authentication: login (JWT), registration, password change"),
        (name = "Users", description = "Roster management: tracked students and staff"),
        (name = "Fingerprints", description = "Scan verification and credential enrollment"),
        (name = "Attendance", description = "Attendance ledger: listings, manual entries, daily stats"),
        (name = "Settings", description = "Global configuration (auto-toggle)"),
    ),
    info(
        title = "Veritouch Attendance API",
        version = "1.0.0",
        description = "REST API for the biometric attendance tracker",
        license(name = "MIT"),
        contact(name = "Veritouch", email = "support@veritouch.io")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    repos: Arc<dyn RepositoryProvider>,
    engine: Arc<AttendanceEngine>,
    db: DatabaseConnection,
    jwt_config: JwtConfig,
) -> Router {
    let middleware_state = AuthState {
        jwt_config: jwt_config.clone(),
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // ── Auth ────────────────────────────────────────────────────

    let auth_state = auth::AuthHandlerState { db, jwt_config };

    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .with_state(auth_state.clone());

    // Auth routes (protected)
    let auth_protected_routes = Router::new()
        .route("/me", get(auth::get_current_admin))
        .route("/change-password", put(auth::change_password))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(auth_state);

    // ── Fingerprints ────────────────────────────────────────────

    let fingerprint_state = fingerprints::FingerprintHandlerState {
        repos: repos.clone(),
        engine,
    };

    // The verify endpoint stays public: it is called by the scanner
    // kiosk, which holds no admin session.
    let fingerprint_routes = Router::new()
        .route("/verify", post(fingerprints::verify_scan))
        .with_state(fingerprint_state.clone());

    let fingerprint_protected_routes = Router::new()
        .route("/register", post(fingerprints::register_credential))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(fingerprint_state);

    // ── Users ───────────────────────────────────────────────────

    let users_state = users::UsersHandlerState {
        repos: repos.clone(),
    };
    let user_routes = Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route(
            "/{id}",
            get(users::get_user).delete(users::delete_user),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(users_state);

    // ── Attendance ──────────────────────────────────────────────

    let attendance_state = attendance::AttendanceHandlerState {
        repos: repos.clone(),
    };
    let attendance_routes = Router::new()
        .route(
            "/logs",
            get(attendance::list_logs).post(attendance::create_log),
        )
        .route("/stats", get(attendance::daily_stats))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(attendance_state);

    // ── Settings ────────────────────────────────────────────────

    let settings_state = settings::SettingsHandlerState { repos };
    let settings_routes = Router::new()
        .route(
            "/",
            get(settings::get_settings).put(settings::update_settings),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state,
            auth_middleware,
        ))
        .with_state(settings_state);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health
        .route("/health", get(health::health_check))
        // Auth
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/auth", auth_protected_routes)
        // Fingerprints
        .nest("/api/v1/fingerprint", fingerprint_routes)
        .nest("/api/v1/fingerprint", fingerprint_protected_routes)
        // Users
        .nest("/api/v1/users", user_routes)
        // Attendance
        .nest("/api/v1/attendance", attendance_routes)
        // Settings
        .nest("/api/v1/settings", settings_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
