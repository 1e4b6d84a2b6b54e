//! Core business entities, types and traits

pub mod attendance;
pub mod credential;
pub mod error;
pub mod repositories;
pub mod settings;
pub mod user;

pub use attendance::{
    AttendanceAction, AttendanceEvent, AttendanceRepository, AttendanceSource, DailyStats,
    EventFilter, NewAttendanceEvent,
};
pub use credential::{Credential, CredentialRepository, NewCredential};
pub use error::{DomainError, DomainResult};
pub use repositories::RepositoryProvider;
pub use settings::{SettingsRepository, SettingsUpdate, SystemSettings};
pub use user::{NewUser, User, UserCategory, UserRepository};
