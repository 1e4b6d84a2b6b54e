pub mod engine;

pub use engine::{AttendanceEngine, ScanOutcome};
