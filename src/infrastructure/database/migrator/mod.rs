//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_users;
mod m20250301_000002_create_admin_accounts;
mod m20250301_000003_create_credentials;
mod m20250301_000004_create_attendance_events;
mod m20250301_000005_create_system_settings;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_users::Migration),
            Box::new(m20250301_000002_create_admin_accounts::Migration),
            Box::new(m20250301_000003_create_credentials::Migration),
            Box::new(m20250301_000004_create_attendance_events::Migration),
            Box::new(m20250301_000005_create_system_settings::Migration),
        ]
    }
}
