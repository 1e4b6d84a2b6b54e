//! SeaORM implementation of AttendanceRepository

use async_trait::async_trait;
use chrono::{Local, NaiveDate, Utc};
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait,
};

use crate::domain::attendance::{
    AttendanceAction, AttendanceEvent, AttendanceRepository, AttendanceSource, DailyStats,
    EventFilter, NewAttendanceEvent,
};
use crate::domain::user::User;
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{attendance_event, user};
use crate::infrastructure::database::repositories::user_repository::model_to_domain as user_to_domain;

pub struct SeaOrmAttendanceRepository {
    db: DatabaseConnection,
}

impl SeaOrmAttendanceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn action_to_string(action: &AttendanceAction) -> String {
    action.as_str().to_string()
}

fn string_to_action(s: &str) -> AttendanceAction {
    AttendanceAction::from_str(s).unwrap_or(AttendanceAction::SignIn)
}

fn string_to_source(s: &str) -> AttendanceSource {
    AttendanceSource::from_str(s).unwrap_or(AttendanceSource::Fingerprint)
}

fn model_to_domain(e: attendance_event::Model) -> AttendanceEvent {
    AttendanceEvent {
        id: e.id,
        user_id: e.user_id,
        action: string_to_action(&e.action),
        timestamp: e.timestamp,
        recorded_on: e.recorded_on,
        source: string_to_source(&e.source),
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Validation(format!("Database error: {}", e))
}

fn duplicate_day_conflict(action: &AttendanceAction, day: NaiveDate) -> DomainError {
    DomainError::Conflict(format!(
        "{} already recorded on {}",
        action.as_str(),
        day
    ))
}

// ── AttendanceRepository impl ───────────────────────────────────

#[async_trait]
impl AttendanceRepository for SeaOrmAttendanceRepository {
    async fn last_event_for_user(&self, user_id: i32) -> DomainResult<Option<AttendanceEvent>> {
        let model = attendance_event::Entity::find()
            .filter(attendance_event::Column::UserId.eq(user_id))
            .order_by_desc(attendance_event::Column::Timestamp)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn count_kind_on_day(
        &self,
        user_id: i32,
        action: AttendanceAction,
        day: NaiveDate,
    ) -> DomainResult<u64> {
        attendance_event::Entity::find()
            .filter(attendance_event::Column::UserId.eq(user_id))
            .filter(attendance_event::Column::Action.eq(action.as_str()))
            .filter(attendance_event::Column::RecordedOn.eq(day))
            .count(&self.db)
            .await
            .map_err(db_err)
    }

    async fn append_event(&self, event: NewAttendanceEvent) -> DomainResult<AttendanceEvent> {
        let now = Utc::now();
        let day = now.with_timezone(&Local).date_naive();

        debug!(
            "Appending attendance event: user={} action={} day={}",
            event.user_id,
            event.action.as_str(),
            day
        );

        // Count check and insert share one transaction so two concurrent
        // scans cannot both pass the check. The unique index over
        // (user_id, action, recorded_on) backstops the same invariant.
        let txn = self.db.begin().await.map_err(db_err)?;

        let existing = attendance_event::Entity::find()
            .filter(attendance_event::Column::UserId.eq(event.user_id))
            .filter(attendance_event::Column::Action.eq(event.action.as_str()))
            .filter(attendance_event::Column::RecordedOn.eq(day))
            .count(&txn)
            .await
            .map_err(db_err)?;

        if existing > 0 {
            txn.rollback().await.map_err(db_err)?;
            return Err(duplicate_day_conflict(&event.action, day));
        }

        let model = attendance_event::ActiveModel {
            id: NotSet,
            user_id: Set(event.user_id),
            action: Set(action_to_string(&event.action)),
            timestamp: Set(now),
            recorded_on: Set(day),
            source: Set(event.source.as_str().to_string()),
        };

        let created = model.insert(&txn).await.map_err(|e| {
            match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    duplicate_day_conflict(&event.action, day)
                }
                _ => db_err(e),
            }
        })?;

        txn.commit().await.map_err(db_err)?;
        Ok(model_to_domain(created))
    }

    async fn list_events(
        &self,
        filter: EventFilter,
    ) -> DomainResult<Vec<(AttendanceEvent, User)>> {
        let mut query = attendance_event::Entity::find()
            .find_also_related(user::Entity)
            .order_by_desc(attendance_event::Column::Timestamp);

        if let Some(user_id) = filter.user_id {
            query = query.filter(attendance_event::Column::UserId.eq(user_id));
        }
        if let Some(date) = filter.date {
            query = query.filter(attendance_event::Column::RecordedOn.eq(date));
        }

        let rows = query.all(&self.db).await.map_err(db_err)?;

        // Events whose user has been deleted stay in the ledger for audit
        // but are not part of listings.
        Ok(rows
            .into_iter()
            .filter_map(|(event, owner)| {
                owner.map(|u| (model_to_domain(event), user_to_domain(u)))
            })
            .collect())
    }

    async fn daily_stats(&self, day: NaiveDate) -> DomainResult<DailyStats> {
        let rows = attendance_event::Entity::find()
            .find_also_related(user::Entity)
            .filter(attendance_event::Column::RecordedOn.eq(day))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(DailyStats::from_day_events(rows.into_iter().filter_map(
            |(event, owner)| {
                let owner = owner?;
                let owner = user_to_domain(owner);
                Some((event.user_id, owner.category, string_to_action(&event.action)))
            },
        )))
    }
}
