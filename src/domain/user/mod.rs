pub mod model;
pub mod repository;

pub use model::{NewUser, User, UserCategory};
pub use repository::UserRepository;
