//! Attendance ledger domain entities

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::user::UserCategory;

/// Kind of attendance action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceAction {
    SignIn,
    SignOut,
}

impl AttendanceAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SignIn => "SIGN_IN",
            Self::SignOut => "SIGN_OUT",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "SIGN_IN" => Some(Self::SignIn),
            "SIGN_OUT" => Some(Self::SignOut),
            _ => None,
        }
    }

    /// The action a subsequent scan toggles to
    pub fn toggled(&self) -> Self {
        match self {
            Self::SignIn => Self::SignOut,
            Self::SignOut => Self::SignIn,
        }
    }

    /// Past-tense phrase for user-facing messages ("signed in")
    pub fn past_phrase(&self) -> &'static str {
        match self {
            Self::SignIn => "signed in",
            Self::SignOut => "signed out",
        }
    }
}

/// How an attendance event was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceSource {
    Fingerprint,
    Manual,
}

impl AttendanceSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fingerprint => "fingerprint",
            Self::Manual => "manual",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "fingerprint" => Some(Self::Fingerprint),
            "manual" => Some(Self::Manual),
            _ => None,
        }
    }
}

/// One row of the append-only attendance ledger.
///
/// Events are immutable once written. For a fixed user they are totally
/// ordered by `timestamp`; `recorded_on` denormalizes the server-local
/// calendar day so the once-per-kind-per-day rule can be enforced by the
/// storage layer.
#[derive(Debug, Clone)]
pub struct AttendanceEvent {
    pub id: i32,
    pub user_id: i32,
    pub action: AttendanceAction,
    /// UTC instant of the scan or manual entry
    pub timestamp: DateTime<Utc>,
    /// Server-local calendar day of `timestamp`
    pub recorded_on: NaiveDate,
    pub source: AttendanceSource,
}

/// Fields for appending a ledger entry. Timestamp and calendar day are
/// assigned by the ledger at insert time.
#[derive(Debug, Clone)]
pub struct NewAttendanceEvent {
    pub user_id: i32,
    pub action: AttendanceAction,
    pub source: AttendanceSource,
}

/// Filter for ledger listings
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub user_id: Option<i32>,
    pub date: Option<NaiveDate>,
}

/// Presence counts for one calendar day.
///
/// "Present" means: signed in that day without a later sign-out that day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyStats {
    pub total_present: u32,
    pub active_students: u32,
    pub active_staff: u32,
}

impl DailyStats {
    /// Compute presence from one day's events.
    ///
    /// A user counts as present when the day holds a sign-in for them and
    /// no sign-out. Under the once-per-kind-per-day rule a sign-out always
    /// follows the sign-in, so it ends presence for the day.
    pub fn from_day_events<I>(events: I) -> Self
    where
        I: IntoIterator<Item = (i32, UserCategory, AttendanceAction)>,
    {
        use std::collections::{HashMap, HashSet};

        let mut signed_in: HashSet<i32> = HashSet::new();
        let mut signed_out: HashSet<i32> = HashSet::new();
        let mut categories: HashMap<i32, UserCategory> = HashMap::new();

        for (user_id, category, action) in events {
            categories.insert(user_id, category);
            match action {
                AttendanceAction::SignIn => {
                    signed_in.insert(user_id);
                }
                AttendanceAction::SignOut => {
                    signed_out.insert(user_id);
                }
            }
        }

        let mut active_students = 0;
        let mut active_staff = 0;
        for user_id in &signed_in {
            if signed_out.contains(user_id) {
                continue;
            }
            match categories[user_id] {
                UserCategory::Student => active_students += 1,
                UserCategory::Staff => active_staff += 1,
            }
        }

        Self {
            total_present: active_students + active_staff,
            active_students,
            active_staff,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_roundtrip() {
        for action in &[AttendanceAction::SignIn, AttendanceAction::SignOut] {
            let parsed = AttendanceAction::from_str(action.as_str()).unwrap();
            assert_eq!(&parsed, action);
        }
        assert!(AttendanceAction::from_str("sign_in").is_none());
    }

    #[test]
    fn source_roundtrip() {
        for source in &[AttendanceSource::Fingerprint, AttendanceSource::Manual] {
            let parsed = AttendanceSource::from_str(source.as_str()).unwrap();
            assert_eq!(&parsed, source);
        }
        assert!(AttendanceSource::from_str("rfid").is_none());
    }

    #[test]
    fn toggled_alternates() {
        assert_eq!(AttendanceAction::SignIn.toggled(), AttendanceAction::SignOut);
        assert_eq!(AttendanceAction::SignOut.toggled(), AttendanceAction::SignIn);
    }

    #[test]
    fn stats_count_sign_ins_without_sign_outs() {
        let stats = DailyStats::from_day_events(vec![
            // Student 1 signed in and out again: not present.
            (1, UserCategory::Student, AttendanceAction::SignIn),
            (1, UserCategory::Student, AttendanceAction::SignOut),
            // Student 2 still in.
            (2, UserCategory::Student, AttendanceAction::SignIn),
            // Staff 3 still in.
            (3, UserCategory::Staff, AttendanceAction::SignIn),
            // Staff 4 only has a sign-out today (signed in yesterday).
            (4, UserCategory::Staff, AttendanceAction::SignOut),
        ]);
        assert_eq!(
            stats,
            DailyStats {
                total_present: 2,
                active_students: 1,
                active_staff: 1,
            }
        );
    }

    #[test]
    fn stats_empty_day() {
        let stats = DailyStats::from_day_events(Vec::new());
        assert_eq!(stats.total_present, 0);
        assert_eq!(stats.active_students, 0);
        assert_eq!(stats.active_staff, 0);
    }
}
