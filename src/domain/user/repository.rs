//! User repository interface

use async_trait::async_trait;

use super::model::{NewUser, User};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List all roster users, newest first.
    async fn find_all(&self) -> DomainResult<Vec<User>>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<User>>;
    async fn create(&self, user: NewUser) -> DomainResult<User>;
    /// Delete a user. Credentials cascade; ledger rows are kept for audit.
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
