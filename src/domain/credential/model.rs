//! Fingerprint credential domain entity

use chrono::{DateTime, Utc};

/// An enrolled fingerprint credential.
///
/// `template_id` is the opaque identifier produced by the platform
/// authenticator during enrollment. It is globally unique: no two users
/// may share one. A user may hold any number of credentials.
#[derive(Debug, Clone)]
pub struct Credential {
    pub id: i32,
    /// Owning roster user
    pub user_id: i32,
    /// Opaque template identifier from the enrollment ceremony
    pub template_id: String,
    /// Opaque credential-type marker (e.g. "fingerprint")
    pub credential_type: String,
    pub created_at: DateTime<Utc>,
}

/// Fields for enrolling a new credential
#[derive(Debug, Clone)]
pub struct NewCredential {
    pub user_id: i32,
    pub template_id: String,
    pub credential_type: Option<String>,
}
