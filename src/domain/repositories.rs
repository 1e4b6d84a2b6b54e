//! Repository traits for the domain layer
//!
//! `RepositoryProvider` gives unified access to all per-aggregate
//! repositories. Consumers request only the repository they need:
//!
//! ```ignore
//! async fn handle(repos: &dyn RepositoryProvider) {
//!     let user = repos.users().find_by_id(1).await?;
//!     let last = repos.attendance().last_event_for_user(1).await?;
//! }
//! ```

use super::attendance::AttendanceRepository;
use super::credential::CredentialRepository;
use super::settings::SettingsRepository;
use super::user::UserRepository;

pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn credentials(&self) -> &dyn CredentialRepository;
    fn attendance(&self) -> &dyn AttendanceRepository;
    fn settings(&self) -> &dyn SettingsRepository;
}
