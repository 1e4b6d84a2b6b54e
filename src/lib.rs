//! # Veritouch Attendance Service
//!
//! Biometric attendance tracker: administrators manage a roster of
//! students and staff, enroll fingerprint credentials for them, and
//! attendance is recorded when a scan matches an enrolled credential.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, types and repository traits
//! - **application**: The attendance decision engine (toggle + daily limit)
//! - **infrastructure**: Database access (SeaORM entities, migrations, repositories)
//! - **auth**: JWT authentication for administrator accounts
//! - **api**: REST API with Swagger documentation

pub mod api;
pub mod application;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export API router
pub use api::create_api_router;
