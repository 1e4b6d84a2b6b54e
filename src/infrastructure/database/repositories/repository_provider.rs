//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::attendance::AttendanceRepository;
use crate::domain::credential::CredentialRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::settings::SettingsRepository;
use crate::domain::user::UserRepository;

use super::attendance_repository::SeaOrmAttendanceRepository;
use super::credential_repository::SeaOrmCredentialRepository;
use super::settings_repository::SeaOrmSettingsRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository
/// accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let user = repos.users().find_by_id(1).await?;
/// let last = repos.attendance().last_event_for_user(1).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    users: SeaOrmUserRepository,
    credentials: SeaOrmCredentialRepository,
    attendance: SeaOrmAttendanceRepository,
    settings: SeaOrmSettingsRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: SeaOrmUserRepository::new(db.clone()),
            credentials: SeaOrmCredentialRepository::new(db.clone()),
            attendance: SeaOrmAttendanceRepository::new(db.clone()),
            settings: SeaOrmSettingsRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn credentials(&self) -> &dyn CredentialRepository {
        &self.credentials
    }

    fn attendance(&self) -> &dyn AttendanceRepository {
        &self.attendance
    }

    fn settings(&self) -> &dyn SettingsRepository {
        &self.settings
    }
}
