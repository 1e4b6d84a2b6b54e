//! SeaORM repository implementations

pub mod attendance_repository;
pub mod credential_repository;
pub mod repository_provider;
pub mod settings_repository;
pub mod user_repository;

pub use attendance_repository::SeaOrmAttendanceRepository;
pub use credential_repository::SeaOrmCredentialRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use settings_repository::SeaOrmSettingsRepository;
pub use user_repository::SeaOrmUserRepository;
