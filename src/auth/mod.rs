//! JWT authentication for administrator accounts

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{create_token, verify_token, AuthError, Claims, JwtConfig};
pub use middleware::{auth_middleware, AuthState, AuthenticatedAdmin};
pub use password::{hash_password, verify_password};
