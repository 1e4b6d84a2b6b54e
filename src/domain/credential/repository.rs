//! Credential repository interface

use async_trait::async_trait;

use super::model::{Credential, NewCredential};
use crate::domain::DomainResult;

#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Exact template-id lookup. This is the whole of credential matching:
    /// no feature-vector comparison happens on the server.
    async fn find_by_template_id(&self, template_id: &str) -> DomainResult<Option<Credential>>;
    /// Enroll a credential. Fails with `Conflict` when the template id is
    /// already enrolled to any user.
    async fn create(&self, credential: NewCredential) -> DomainResult<Credential>;
}
