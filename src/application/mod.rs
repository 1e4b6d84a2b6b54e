//! Business logic and use cases

pub mod attendance;

pub use attendance::{AttendanceEngine, ScanOutcome};
