//! Roster user domain entity

use chrono::{DateTime, Utc};

/// Category of a tracked person
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCategory {
    Student,
    Staff,
}

impl UserCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Staff => "staff",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "student" => Some(Self::Student),
            "staff" => Some(Self::Staff),
            _ => None,
        }
    }
}

/// A person tracked for attendance (student or staff member).
///
/// Distinct from [`AdminAccount`]s: roster users never log in, they are
/// identified at the scanner by an enrolled fingerprint credential.
///
/// [`AdminAccount`]: crate::infrastructure::database::entities::admin_account
#[derive(Debug, Clone)]
pub struct User {
    /// Unique numeric ID
    pub id: i32,
    pub full_name: String,
    pub category: UserCategory,
    /// Optional unique email for linkage
    pub email: Option<String>,
    /// Enrolled course, informational only
    pub course_name: Option<String>,
    /// Course duration, informational only (e.g. "3 months")
    pub duration: Option<String>,
    /// Sessions per week, informational only
    pub frequency: Option<i32>,
    /// Comma-separated weekdays, informational only (e.g. "Mon,Wed,Fri")
    pub days_of_week: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields for creating a new roster user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub category: UserCategory,
    pub email: Option<String>,
    pub course_name: Option<String>,
    pub duration: Option<String>,
    pub frequency: Option<i32>,
    pub days_of_week: Option<String>,
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_roundtrip() {
        for cat in &[UserCategory::Student, UserCategory::Staff] {
            let parsed = UserCategory::from_str(cat.as_str()).unwrap();
            assert_eq!(&parsed, cat);
        }
        assert!(UserCategory::from_str("teacher").is_none());
    }
}
