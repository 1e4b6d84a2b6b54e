pub mod model;
pub mod repository;

pub use model::{SettingsUpdate, SystemSettings};
pub use repository::SettingsRepository;
