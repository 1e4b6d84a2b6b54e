//! Attendance ledger repository interface

use async_trait::async_trait;
use chrono::NaiveDate;

use super::model::{
    AttendanceAction, AttendanceEvent, DailyStats, EventFilter, NewAttendanceEvent,
};
use crate::domain::user::User;
use crate::domain::DomainResult;

#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Most recent event for a user across all days, by timestamp.
    async fn last_event_for_user(&self, user_id: i32) -> DomainResult<Option<AttendanceEvent>>;

    /// Number of events of `action` for `user_id` recorded on `day`.
    async fn count_kind_on_day(
        &self,
        user_id: i32,
        action: AttendanceAction,
        day: NaiveDate,
    ) -> DomainResult<u64>;

    /// Append one ledger entry, stamped with the current instant and the
    /// server-local calendar day.
    ///
    /// The once-per-kind-per-day invariant is enforced here: the count
    /// check and insert run in a single database transaction, backed by a
    /// unique index on (user, action, day). A duplicate yields `Conflict`.
    async fn append_event(&self, event: NewAttendanceEvent) -> DomainResult<AttendanceEvent>;

    /// List events with their users, newest first. Events whose user has
    /// been deleted are skipped.
    async fn list_events(&self, filter: EventFilter)
        -> DomainResult<Vec<(AttendanceEvent, User)>>;

    /// Presence counts for `day`.
    async fn daily_stats(&self, day: NaiveDate) -> DomainResult<DailyStats>;
}
