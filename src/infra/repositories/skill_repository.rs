//! Skill repository (reference data).

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};
use uuid::Uuid;

use crate::domain::Skill;
use crate::errors::{AppError, AppResult};

use super::entities::{job_skill, skill, user_skill};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Skill persistence operations
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SkillRepository: Send + Sync {
    /// Find a skill by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Skill>>;

    /// Insert; duplicate slug surfaces as Conflict
    async fn create(&self, name: String, slug: String) -> AppResult<Skill>;

    /// Hard delete (callers enforce the unreferenced guard)
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// All skills, alphabetical; reference data stays small
    async fn list(&self) -> AppResult<Vec<Skill>>;

    /// Which of the given IDs exist (used to validate skill sets)
    async fn find_existing_ids(&self, ids: Vec<Uuid>) -> AppResult<Vec<Uuid>>;

    /// References from jobs and from user profiles
    async fn count_references(&self, skill_id: Uuid) -> AppResult<u64>;
}

/// SeaORM-backed skill repository
pub struct SkillStore {
    db: DatabaseConnection,
}

impl SkillStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl SkillRepository for SkillStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Skill>> {
        let model = skill::Entity::find_by_id(id).one(self.db()).await?;
        Ok(model.map(Skill::from))
    }

    async fn create(&self, name: String, slug: String) -> AppResult<Skill> {
        let active = skill::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            slug: Set(slug),
            created_at: Set(Utc::now()),
        };

        let model = active.insert(self.db()).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict("Skill"),
            _ => AppError::from(e),
        })?;

        Ok(Skill::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = skill::Entity::delete_by_id(id).exec(self.db()).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("Skill"));
        }
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<Skill>> {
        let rows = skill::Entity::find()
            .order_by(skill::Column::Name, Order::Asc)
            .all(self.db())
            .await?;
        Ok(rows.into_iter().map(Skill::from).collect())
    }

    async fn find_existing_ids(&self, ids: Vec<Uuid>) -> AppResult<Vec<Uuid>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let found: Vec<Uuid> = skill::Entity::find()
            .select_only()
            .column(skill::Column::Id)
            .filter(skill::Column::Id.is_in(ids))
            .into_tuple()
            .all(self.db())
            .await?;
        Ok(found)
    }

    async fn count_references(&self, skill_id: Uuid) -> AppResult<u64> {
        let from_jobs = job_skill::Entity::find()
            .filter(job_skill::Column::SkillId.eq(skill_id))
            .count(self.db())
            .await?;
        let from_users = user_skill::Entity::find()
            .filter(user_skill::Column::SkillId.eq(skill_id))
            .count(self.db())
            .await?;
        Ok(from_jobs + from_users)
    }
}
