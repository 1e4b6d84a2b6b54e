//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, EntityTrait, QueryOrder, Set,
    SqlErr,
};

use crate::domain::user::{NewUser, User, UserCategory, UserRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::user;

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn category_to_entity(category: UserCategory) -> user::UserCategory {
    match category {
        UserCategory::Student => user::UserCategory::Student,
        UserCategory::Staff => user::UserCategory::Staff,
    }
}

fn category_to_domain(category: user::UserCategory) -> UserCategory {
    match category {
        user::UserCategory::Student => UserCategory::Student,
        user::UserCategory::Staff => UserCategory::Staff,
    }
}

pub(crate) fn model_to_domain(u: user::Model) -> User {
    User {
        id: u.id,
        full_name: u.full_name,
        category: category_to_domain(u.category),
        email: u.email,
        course_name: u.course_name,
        duration: u.duration,
        frequency: u.frequency,
        days_of_week: u.days_of_week,
        created_at: u.created_at,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Validation(format!("Database error: {}", e))
}

// ── UserRepository impl ─────────────────────────────────────────

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_all(&self) -> DomainResult<Vec<User>> {
        let models = user::Entity::find()
            .order_by_desc(user::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn create(&self, new_user: NewUser) -> DomainResult<User> {
        debug!("Creating user: {}", new_user.full_name);

        let model = user::ActiveModel {
            id: NotSet,
            full_name: Set(new_user.full_name),
            category: Set(category_to_entity(new_user.category)),
            email: Set(new_user.email),
            course_name: Set(new_user.course_name),
            duration: Set(new_user.duration),
            frequency: Set(new_user.frequency),
            days_of_week: Set(new_user.days_of_week),
            created_at: Set(Utc::now()),
        };

        let created = model.insert(&self.db).await.map_err(|e| {
            match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    DomainError::Conflict("Email already exists".to_string())
                }
                _ => db_err(e),
            }
        })?;
        Ok(model_to_domain(created))
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        debug!("Deleting user: {}", id);

        let result = user::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: id.to_string(),
            });
        }
        Ok(())
    }
}
