//! Create attendance events table
//!
//! No foreign key to users: deleting a user keeps their ledger rows
//! for audit. The unique index over (user_id, action, recorded_on)
//! enforces the once-per-kind-per-day rule at the storage layer, so a
//! concurrent duplicate scan cannot slip past the application check.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AttendanceEvents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AttendanceEvents::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AttendanceEvents::UserId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AttendanceEvents::Action).string().not_null())
                    .col(
                        ColumnDef::new(AttendanceEvents::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceEvents::RecordedOn)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceEvents::Source)
                            .string()
                            .not_null()
                            .default("fingerprint"),
                    )
                    .to_owned(),
            )
            .await?;

        // Index for "last event for user" lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_attendance_events_user_timestamp")
                    .table(AttendanceEvents::Table)
                    .col(AttendanceEvents::UserId)
                    .col(AttendanceEvents::Timestamp)
                    .to_owned(),
            )
            .await?;

        // One accepted event per user, action kind and calendar day
        manager
            .create_index(
                Index::create()
                    .name("uq_attendance_events_user_action_day")
                    .table(AttendanceEvents::Table)
                    .col(AttendanceEvents::UserId)
                    .col(AttendanceEvents::Action)
                    .col(AttendanceEvents::RecordedOn)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AttendanceEvents::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum AttendanceEvents {
    Table,
    Id,
    UserId,
    Action,
    Timestamp,
    RecordedOn,
    Source,
}
