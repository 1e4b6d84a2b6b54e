pub mod model;
pub mod repository;

pub use model::{Credential, NewCredential};
pub use repository::CredentialRepository;
