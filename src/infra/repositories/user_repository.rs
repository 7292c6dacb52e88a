//! User repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, SqlErr,
};
use uuid::Uuid;

use crate::domain::{User, UserRole, UserSkill};
use crate::errors::{AppError, AppResult};

use super::entities::{user, user_skill};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User persistence operations
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by email (callers pass the lowercased form)
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a new active user; duplicate email surfaces as Conflict
    async fn create(
        &self,
        email: String,
        password_hash: String,
        name: String,
        role: UserRole,
    ) -> AppResult<User>;

    /// Update profile fields
    async fn update_profile(&self, id: Uuid, name: Option<String>) -> AppResult<User>;

    /// Deactivate an account: clears the active flag and replaces the email
    /// with the provided tombstone value, freeing the original address
    async fn deactivate(&self, id: Uuid, tombstone_email: String) -> AppResult<()>;

    /// Skills held by a user
    async fn list_skills(&self, user_id: Uuid) -> AppResult<Vec<UserSkill>>;
}

/// SeaORM-backed user repository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let model = user::Entity::find_by_id(id).one(self.db()).await?;
        Ok(model.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db())
            .await?;
        Ok(model.map(User::from))
    }

    async fn create(
        &self,
        email: String,
        password_hash: String,
        name: String,
        role: UserRole,
    ) -> AppResult<User> {
        let now = Utc::now();
        let active = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email),
            password_hash: Set(password_hash),
            name: Set(name),
            role: Set(role.to_string()),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active.insert(self.db()).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict("User"),
            _ => AppError::from(e),
        })?;

        Ok(User::from(model))
    }

    async fn update_profile(&self, id: Uuid, name: Option<String>) -> AppResult<User> {
        let model = user::Entity::find_by_id(id)
            .one(self.db())
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;

        let mut active: user::ActiveModel = model.into();
        if let Some(name) = name {
            active.name = Set(name);
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(self.db()).await?;
        Ok(User::from(model))
    }

    async fn deactivate(&self, id: Uuid, tombstone_email: String) -> AppResult<()> {
        let model = user::Entity::find_by_id(id)
            .one(self.db())
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;

        let mut active: user::ActiveModel = model.into();
        active.is_active = Set(false);
        active.email = Set(tombstone_email);
        active.updated_at = Set(Utc::now());

        active.update(self.db()).await?;
        Ok(())
    }

    async fn list_skills(&self, user_id: Uuid) -> AppResult<Vec<UserSkill>> {
        let rows = user_skill::Entity::find()
            .filter(user_skill::Column::UserId.eq(user_id))
            .all(self.db())
            .await?;
        Ok(rows.into_iter().map(UserSkill::from).collect())
    }
}
