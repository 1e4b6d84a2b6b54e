//! SeaORM entities

pub mod admin_account;
pub mod attendance_event;
pub mod credential;
pub mod settings;
pub mod user;
