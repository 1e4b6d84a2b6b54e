pub mod model;
pub mod repository;

pub use model::{
    AttendanceAction, AttendanceEvent, AttendanceSource, DailyStats, EventFilter,
    NewAttendanceEvent,
};
pub use repository::AttendanceRepository;
