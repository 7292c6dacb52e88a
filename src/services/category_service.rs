//! Category service - reference data managed by admins.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{slugify, Actor, Category, CreateNamed};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Category service trait for dependency injection.
#[async_trait]
pub trait CategoryService: Send + Sync {
    /// All categories (public)
    async fn list_categories(&self) -> AppResult<Vec<Category>>;

    /// Create a category (admin)
    async fn create_category(&self, actor: &Actor, data: CreateNamed) -> AppResult<Category>;

    /// Rename/describe a category (admin)
    async fn update_category(
        &self,
        actor: &Actor,
        id: Uuid,
        data: CreateNamed,
    ) -> AppResult<Category>;

    /// Delete a category no job references (admin)
    async fn delete_category(&self, actor: &Actor, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of CategoryService using Unit of Work.
pub struct CategoryManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CategoryManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

fn ensure_admin(actor: &Actor) -> AppResult<()> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

fn named_slug(name: &str) -> AppResult<String> {
    let slug = slugify(name);
    if slug.is_empty() {
        return Err(AppError::validation("name must contain letters or digits"));
    }
    Ok(slug)
}

#[async_trait]
impl<U: UnitOfWork> CategoryService for CategoryManager<U> {
    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.uow.categories().list().await
    }

    async fn create_category(&self, actor: &Actor, data: CreateNamed) -> AppResult<Category> {
        ensure_admin(actor)?;
        let slug = named_slug(&data.name)?;
        self.uow
            .categories()
            .create(data.name, slug, data.description)
            .await
    }

    async fn update_category(
        &self,
        actor: &Actor,
        id: Uuid,
        data: CreateNamed,
    ) -> AppResult<Category> {
        ensure_admin(actor)?;

        let mut category = self
            .uow
            .categories()
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Category"))?;

        category.slug = named_slug(&data.name)?;
        category.name = data.name;
        category.description = data.description;

        self.uow.categories().update(&category).await
    }

    async fn delete_category(&self, actor: &Actor, id: Uuid) -> AppResult<()> {
        ensure_admin(actor)?;

        let category = self
            .uow
            .categories()
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Category"))?;

        let jobs = self.uow.jobs().count_for_category(category.id).await?;
        if jobs > 0 {
            return Err(AppError::validation("category is referenced by jobs"));
        }

        self.uow.categories().delete(category.id).await
    }
}
