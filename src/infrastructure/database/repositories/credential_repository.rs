//! SeaORM implementation of CredentialRepository

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, Set, SqlErr,
};

use crate::domain::credential::{Credential, CredentialRepository, NewCredential};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::credential;

pub struct SeaOrmCredentialRepository {
    db: DatabaseConnection,
}

impl SeaOrmCredentialRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(c: credential::Model) -> Credential {
    Credential {
        id: c.id,
        user_id: c.user_id,
        template_id: c.template_id,
        credential_type: c.credential_type,
        created_at: c.created_at,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Validation(format!("Database error: {}", e))
}

// ── CredentialRepository impl ───────────────────────────────────

#[async_trait]
impl CredentialRepository for SeaOrmCredentialRepository {
    async fn find_by_template_id(&self, template_id: &str) -> DomainResult<Option<Credential>> {
        let model = credential::Entity::find()
            .filter(credential::Column::TemplateId.eq(template_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn create(&self, new_credential: NewCredential) -> DomainResult<Credential> {
        debug!(
            "Enrolling credential for user {}: {}",
            new_credential.user_id, new_credential.template_id
        );

        let model = credential::ActiveModel {
            id: NotSet,
            user_id: Set(new_credential.user_id),
            template_id: Set(new_credential.template_id),
            credential_type: Set(new_credential
                .credential_type
                .unwrap_or_else(|| "fingerprint".to_string())),
            created_at: Set(Utc::now()),
        };

        // The unique column on template_id guards against enrolling the
        // same template to two users, even concurrently.
        let created = model.insert(&self.db).await.map_err(|e| {
            match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::Conflict(
                    "Template already enrolled to a user".to_string(),
                ),
                _ => db_err(e),
            }
        })?;
        Ok(model_to_domain(created))
    }
}
