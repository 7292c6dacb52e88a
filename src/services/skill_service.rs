//! Skill service - reference data managed by admins.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{slugify, Actor, CreateNamed, Skill};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Skill service trait for dependency injection.
#[async_trait]
pub trait SkillService: Send + Sync {
    /// All skills (public)
    async fn list_skills(&self) -> AppResult<Vec<Skill>>;

    /// Create a skill (admin)
    async fn create_skill(&self, actor: &Actor, data: CreateNamed) -> AppResult<Skill>;

    /// Delete a skill neither jobs nor users reference (admin)
    async fn delete_skill(&self, actor: &Actor, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of SkillService using Unit of Work.
pub struct SkillManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> SkillManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> SkillService for SkillManager<U> {
    async fn list_skills(&self) -> AppResult<Vec<Skill>> {
        self.uow.skills().list().await
    }

    async fn create_skill(&self, actor: &Actor, data: CreateNamed) -> AppResult<Skill> {
        if !actor.is_admin() {
            return Err(AppError::Forbidden);
        }

        let slug = slugify(&data.name);
        if slug.is_empty() {
            return Err(AppError::validation("name must contain letters or digits"));
        }

        self.uow.skills().create(data.name, slug).await
    }

    async fn delete_skill(&self, actor: &Actor, id: Uuid) -> AppResult<()> {
        if !actor.is_admin() {
            return Err(AppError::Forbidden);
        }

        let skill = self
            .uow
            .skills()
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Skill"))?;

        let references = self.uow.skills().count_references(skill.id).await?;
        if references > 0 {
            return Err(AppError::validation(
                "skill is referenced by jobs or user profiles",
            ));
        }

        self.uow.skills().delete(skill.id).await
    }
}
