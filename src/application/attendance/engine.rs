//! Attendance decision engine — application-layer orchestration
//!
//! Decides, for a verified fingerprint match, whether the event is a
//! sign-in or a sign-out, and whether it is accepted or rejected under
//! the once-per-kind-per-day rule. This is the only component with
//! branching business logic; HTTP handlers are thin wrappers around it.

use std::sync::Arc;

use chrono::Local;
use tracing::{debug, info};

use crate::domain::{
    AttendanceAction, AttendanceEvent, AttendanceSource, DomainError, DomainResult,
    NewAttendanceEvent, RepositoryProvider, User,
};

/// Outcome of a scan decision.
///
/// `AlreadyRecorded` is a normal, expected outcome (a business rule
/// declined the event), not a fault. System faults surface as
/// `DomainError` instead.
#[derive(Debug, Clone)]
pub enum ScanOutcome {
    /// The event was accepted and appended to the ledger.
    Accepted {
        event: AttendanceEvent,
        user: User,
        action: AttendanceAction,
    },
    /// The user already performed this action today; nothing was written.
    AlreadyRecorded {
        action: AttendanceAction,
        message: String,
    },
}

/// Attendance decision engine.
///
/// Holds no state of its own: settings are re-read on every invocation
/// so an administrative toggle takes effect on the very next scan.
pub struct AttendanceEngine {
    repos: Arc<dyn RepositoryProvider>,
}

impl AttendanceEngine {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Record a scan for an already-authenticated user.
    ///
    /// Credential resolution is the caller's job; this operation starts
    /// from the resolved user id (the lookup here is defensive).
    ///
    /// Candidate selection: with auto-toggle off every scan is a sign-in
    /// candidate. With auto-toggle on, the direction alternates based on
    /// the most recent event of ANY day: the toggle does not reset at
    /// midnight; only the duplicate check below is bound to the calendar
    /// day. A sign-in yesterday therefore toggles today's first scan to
    /// a sign-out.
    ///
    /// Exactly one ledger insert happens on acceptance, zero on any
    /// rejection path.
    pub async fn record_scan_event(&self, user_id: i32) -> DomainResult<ScanOutcome> {
        let user = self
            .repos
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: user_id.to_string(),
            })?;

        let settings = self.repos.settings().get_or_create().await?;

        let action = if settings.auto_toggle_enabled {
            match self.repos.attendance().last_event_for_user(user.id).await? {
                Some(last) if last.action == AttendanceAction::SignIn => AttendanceAction::SignOut,
                _ => AttendanceAction::SignIn,
            }
        } else {
            AttendanceAction::SignIn
        };

        let today = Local::now().date_naive();
        let already = self
            .repos
            .attendance()
            .count_kind_on_day(user.id, action, today)
            .await?;
        if already >= 1 {
            debug!(
                user_id = user.id,
                action = action.as_str(),
                "Scan rejected: daily limit reached"
            );
            return Ok(ScanOutcome::AlreadyRecorded {
                action,
                message: duplicate_message(action),
            });
        }

        let appended = self
            .repos
            .attendance()
            .append_event(NewAttendanceEvent {
                user_id: user.id,
                action,
                source: AttendanceSource::Fingerprint,
            })
            .await;

        match appended {
            Ok(event) => {
                info!(
                    user_id = user.id,
                    action = action.as_str(),
                    event_id = event.id,
                    "Attendance recorded"
                );
                Ok(ScanOutcome::Accepted {
                    event,
                    user,
                    action,
                })
            }
            // Lost the race against a concurrent scan for the same user:
            // the ledger's transactional check (or its unique index)
            // fired after our count passed. Same outcome as the count
            // check above, and still zero new rows from this call.
            Err(DomainError::Conflict(_)) => {
                debug!(
                    user_id = user.id,
                    action = action.as_str(),
                    "Scan rejected by ledger constraint"
                );
                Ok(ScanOutcome::AlreadyRecorded {
                    action,
                    message: duplicate_message(action),
                })
            }
            Err(e) => Err(e),
        }
    }
}

fn duplicate_message(action: AttendanceAction) -> String {
    format!("You have already {} today", action.past_phrase())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicI32, AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{Duration, NaiveDate, Utc};

    use super::*;
    use crate::domain::{
        AttendanceRepository, Credential, CredentialRepository, DailyStats, EventFilter,
        NewCredential, NewUser, SettingsRepository, SettingsUpdate, SystemSettings, UserCategory,
        UserRepository,
    };

    // ── In-memory fakes ─────────────────────────────────────────

    struct FakeUsers {
        rows: Mutex<Vec<User>>,
    }

    #[async_trait]
    impl UserRepository for FakeUsers {
        async fn find_all(&self) -> DomainResult<Vec<User>> {
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn find_by_id(&self, id: i32) -> DomainResult<Option<User>> {
            Ok(self.rows.lock().unwrap().iter().find(|u| u.id == id).cloned())
        }

        async fn create(&self, user: NewUser) -> DomainResult<User> {
            let mut rows = self.rows.lock().unwrap();
            let created = User {
                id: rows.len() as i32 + 1,
                full_name: user.full_name,
                category: user.category,
                email: user.email,
                course_name: user.course_name,
                duration: user.duration,
                frequency: user.frequency,
                days_of_week: user.days_of_week,
                created_at: Utc::now(),
            };
            rows.push(created.clone());
            Ok(created)
        }

        async fn delete(&self, id: i32) -> DomainResult<()> {
            self.rows.lock().unwrap().retain(|u| u.id != id);
            Ok(())
        }
    }

    struct FakeCredentials;

    #[async_trait]
    impl CredentialRepository for FakeCredentials {
        async fn find_by_template_id(&self, _: &str) -> DomainResult<Option<Credential>> {
            Ok(None)
        }

        async fn create(&self, _: NewCredential) -> DomainResult<Credential> {
            unreachable!("engine never enrolls credentials")
        }
    }

    struct FakeLedger {
        rows: Mutex<Vec<AttendanceEvent>>,
        next_id: AtomicI32,
        /// Simulates a concurrent writer winning the race: the next
        /// append fails with `Conflict` even though the count check
        /// saw nothing.
        conflict_on_next_append: AtomicBool,
    }

    impl FakeLedger {
        fn new() -> Self {
            Self {
                rows: Mutex::new(Vec::new()),
                next_id: AtomicI32::new(1),
                conflict_on_next_append: AtomicBool::new(false),
            }
        }

        fn seed(&self, user_id: i32, action: AttendanceAction, day: NaiveDate) {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            // Spread seeded timestamps so "last event" ordering is stable.
            let timestamp = Utc::now() - Duration::hours((1000 - id) as i64);
            self.rows.lock().unwrap().push(AttendanceEvent {
                id,
                user_id,
                action,
                timestamp,
                recorded_on: day,
                source: AttendanceSource::Fingerprint,
            });
        }

        fn len(&self) -> usize {
            self.rows.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl AttendanceRepository for FakeLedger {
        async fn last_event_for_user(&self, user_id: i32) -> DomainResult<Option<AttendanceEvent>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.user_id == user_id)
                .max_by_key(|e| e.timestamp)
                .cloned())
        }

        async fn count_kind_on_day(
            &self,
            user_id: i32,
            action: AttendanceAction,
            day: NaiveDate,
        ) -> DomainResult<u64> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.user_id == user_id && e.action == action && e.recorded_on == day)
                .count() as u64)
        }

        async fn append_event(&self, event: NewAttendanceEvent) -> DomainResult<AttendanceEvent> {
            if self.conflict_on_next_append.swap(false, Ordering::SeqCst) {
                return Err(DomainError::Conflict(
                    "attendance already recorded for this day".into(),
                ));
            }
            let now = Utc::now();
            let day = now.with_timezone(&Local).date_naive();
            let mut rows = self.rows.lock().unwrap();
            // Mirror the real ledger's transactional duplicate check.
            if rows
                .iter()
                .any(|e| e.user_id == event.user_id && e.action == event.action && e.recorded_on == day)
            {
                return Err(DomainError::Conflict(
                    "attendance already recorded for this day".into(),
                ));
            }
            let created = AttendanceEvent {
                id: self.next_id.fetch_add(1, Ordering::SeqCst),
                user_id: event.user_id,
                action: event.action,
                timestamp: now,
                recorded_on: day,
                source: event.source,
            };
            rows.push(created.clone());
            Ok(created)
        }

        async fn list_events(
            &self,
            _: EventFilter,
        ) -> DomainResult<Vec<(AttendanceEvent, User)>> {
            unreachable!("engine never lists events")
        }

        async fn daily_stats(&self, _: NaiveDate) -> DomainResult<DailyStats> {
            unreachable!("engine never computes stats")
        }
    }

    struct FakeSettings {
        row: Mutex<Option<SystemSettings>>,
        reads: AtomicUsize,
    }

    impl FakeSettings {
        fn new() -> Self {
            Self {
                row: Mutex::new(None),
                reads: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl SettingsRepository for FakeSettings {
        async fn get_or_create(&self) -> DomainResult<SystemSettings> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            let mut row = self.row.lock().unwrap();
            Ok(row
                .get_or_insert_with(|| SystemSettings {
                    id: 1,
                    auto_toggle_enabled: true,
                    updated_at: Utc::now(),
                })
                .clone())
        }

        async fn update(&self, update: SettingsUpdate) -> DomainResult<SystemSettings> {
            let mut row = self.row.lock().unwrap();
            let settings = row.get_or_insert_with(|| SystemSettings {
                id: 1,
                auto_toggle_enabled: true,
                updated_at: Utc::now(),
            });
            if let Some(enabled) = update.auto_toggle_enabled {
                settings.auto_toggle_enabled = enabled;
            }
            settings.updated_at = Utc::now();
            Ok(settings.clone())
        }
    }

    struct InMemoryRepos {
        users: FakeUsers,
        credentials: FakeCredentials,
        attendance: FakeLedger,
        settings: FakeSettings,
    }

    impl InMemoryRepos {
        fn with_user() -> (Arc<Self>, i32) {
            let repos = Arc::new(Self {
                users: FakeUsers {
                    rows: Mutex::new(vec![User {
                        id: 1,
                        full_name: "Alice Student".into(),
                        category: UserCategory::Student,
                        email: Some("alice@school.edu".into()),
                        course_name: None,
                        duration: None,
                        frequency: None,
                        days_of_week: None,
                        created_at: Utc::now(),
                    }]),
                },
                credentials: FakeCredentials,
                attendance: FakeLedger::new(),
                settings: FakeSettings::new(),
            });
            (repos, 1)
        }
    }

    impl RepositoryProvider for InMemoryRepos {
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

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    fn yesterday() -> NaiveDate {
        today().pred_opt().unwrap()
    }

    // ── Scenarios ───────────────────────────────────────────────

    #[tokio::test]
    async fn first_scan_signs_in() {
        let (repos, user_id) = InMemoryRepos::with_user();
        let engine = AttendanceEngine::new(repos.clone());

        let outcome = engine.record_scan_event(user_id).await.unwrap();
        match outcome {
            ScanOutcome::Accepted { action, event, .. } => {
                assert_eq!(action, AttendanceAction::SignIn);
                assert_eq!(event.source, AttendanceSource::Fingerprint);
            }
            other => panic!("expected acceptance, got {:?}", other),
        }
        assert_eq!(repos.attendance.len(), 1);
    }

    #[tokio::test]
    async fn duplicate_hardware_trigger_rejected_without_write() {
        // Two near-simultaneous triggers: both pass the count check, the
        // second append hits the ledger constraint.
        let (repos, user_id) = InMemoryRepos::with_user();
        let engine = AttendanceEngine::new(repos.clone());

        engine.record_scan_event(user_id).await.unwrap();
        repos
            .attendance
            .conflict_on_next_append
            .store(true, Ordering::SeqCst);

        let outcome = engine.record_scan_event(user_id).await.unwrap();
        match outcome {
            ScanOutcome::AlreadyRecorded { message, .. } => {
                assert!(message.contains("already"));
            }
            other => panic!("expected rejection, got {:?}", other),
        }
        assert_eq!(repos.attendance.len(), 1);
    }

    #[tokio::test]
    async fn toggle_alternates_then_daily_limit_blocks() {
        let (repos, user_id) = InMemoryRepos::with_user();
        let engine = AttendanceEngine::new(repos.clone());

        // Sign in, then toggle to sign out.
        let first = engine.record_scan_event(user_id).await.unwrap();
        assert!(matches!(
            first,
            ScanOutcome::Accepted {
                action: AttendanceAction::SignIn,
                ..
            }
        ));
        let second = engine.record_scan_event(user_id).await.unwrap();
        assert!(matches!(
            second,
            ScanOutcome::Accepted {
                action: AttendanceAction::SignOut,
                ..
            }
        ));

        // Third scan toggles back to sign-in, which was already used today.
        let third = engine.record_scan_event(user_id).await.unwrap();
        assert!(matches!(
            third,
            ScanOutcome::AlreadyRecorded {
                action: AttendanceAction::SignIn,
                ..
            }
        ));
        assert_eq!(repos.attendance.len(), 2);
    }

    #[tokio::test]
    async fn auto_toggle_off_always_candidates_sign_in() {
        let (repos, user_id) = InMemoryRepos::with_user();
        repos
            .settings
            .update(SettingsUpdate {
                auto_toggle_enabled: Some(false),
            })
            .await
            .unwrap();
        // Even with a sign-in as the most recent event, the candidate
        // stays sign-in, and today's sign-in already exists.
        repos
            .attendance
            .seed(user_id, AttendanceAction::SignIn, today());

        let engine = AttendanceEngine::new(repos.clone());
        let outcome = engine.record_scan_event(user_id).await.unwrap();
        assert!(matches!(
            outcome,
            ScanOutcome::AlreadyRecorded {
                action: AttendanceAction::SignIn,
                ..
            }
        ));
        assert_eq!(repos.attendance.len(), 1);
    }

    #[tokio::test]
    async fn toggle_ignores_day_boundary() {
        // Yesterday's sign-in was never signed out. Today's first scan
        // toggles to sign-out and is accepted, because no sign-out
        // exists today. The toggle looks across days, the limit does not.
        let (repos, user_id) = InMemoryRepos::with_user();
        repos
            .attendance
            .seed(user_id, AttendanceAction::SignIn, yesterday());

        let engine = AttendanceEngine::new(repos.clone());
        let outcome = engine.record_scan_event(user_id).await.unwrap();
        match outcome {
            ScanOutcome::Accepted { action, event, .. } => {
                assert_eq!(action, AttendanceAction::SignOut);
                assert_eq!(event.recorded_on, today());
            }
            other => panic!("expected acceptance, got {:?}", other),
        }
        assert_eq!(repos.attendance.len(), 2);
    }

    #[tokio::test]
    async fn rejected_scans_never_mutate_the_ledger() {
        let (repos, user_id) = InMemoryRepos::with_user();
        repos
            .settings
            .update(SettingsUpdate {
                auto_toggle_enabled: Some(false),
            })
            .await
            .unwrap();
        repos
            .attendance
            .seed(user_id, AttendanceAction::SignIn, today());

        let engine = AttendanceEngine::new(repos.clone());
        for _ in 0..3 {
            let outcome = engine.record_scan_event(user_id).await.unwrap();
            assert!(matches!(outcome, ScanOutcome::AlreadyRecorded { .. }));
        }
        assert_eq!(repos.attendance.len(), 1);
    }

    #[tokio::test]
    async fn unknown_user_is_not_found_before_any_settings_read() {
        let (repos, _) = InMemoryRepos::with_user();
        let engine = AttendanceEngine::new(repos.clone());

        let err = engine.record_scan_event(999).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "User", .. }));
        assert_eq!(repos.settings.reads.load(Ordering::SeqCst), 0);
        assert_eq!(repos.attendance.len(), 0);
    }

    #[tokio::test]
    async fn settings_change_applies_on_next_scan() {
        let (repos, user_id) = InMemoryRepos::with_user();
        let engine = AttendanceEngine::new(repos.clone());

        // With auto-toggle on, the second scan would be a sign-out…
        engine.record_scan_event(user_id).await.unwrap();

        // …but disabling the toggle between scans makes it a sign-in
        // candidate again, which today's ledger already holds.
        repos
            .settings
            .update(SettingsUpdate {
                auto_toggle_enabled: Some(false),
            })
            .await
            .unwrap();

        let outcome = engine.record_scan_event(user_id).await.unwrap();
        assert!(matches!(
            outcome,
            ScanOutcome::AlreadyRecorded {
                action: AttendanceAction::SignIn,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn settings_roundtrip_and_lazy_default() {
        let (repos, _) = InMemoryRepos::with_user();

        // First read creates the default.
        let created = repos.settings.get_or_create().await.unwrap();
        assert!(created.auto_toggle_enabled);

        let updated = repos
            .settings
            .update(SettingsUpdate {
                auto_toggle_enabled: Some(false),
            })
            .await
            .unwrap();
        assert!(!updated.auto_toggle_enabled);

        let reread = repos.settings.get_or_create().await.unwrap();
        assert!(!reread.auto_toggle_enabled);
    }
}
