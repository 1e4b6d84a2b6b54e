//! API data transfer objects

pub mod common;

pub use common::{domain_error_response, ErrorResponse, ValidatedJson};
