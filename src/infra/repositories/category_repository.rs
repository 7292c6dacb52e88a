//! Category repository (reference data).

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Order, QueryOrder, Set, SqlErr};
use uuid::Uuid;

use crate::domain::Category;
use crate::errors::{AppError, AppResult};

use super::entities::category;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Category persistence operations
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Find a category by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Category>>;

    /// Insert; duplicate slug surfaces as Conflict
    async fn create(
        &self,
        name: String,
        slug: String,
        description: Option<String>,
    ) -> AppResult<Category>;

    /// Update name/slug/description
    async fn update(&self, category: &Category) -> AppResult<Category>;

    /// Hard delete (callers enforce the unreferenced guard)
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// All categories, alphabetical; reference data stays small
    async fn list(&self) -> AppResult<Vec<Category>>;
}

/// SeaORM-backed category repository
pub struct CategoryStore {
    db: DatabaseConnection,
}

impl CategoryStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

fn map_unique(e: sea_orm::DbErr) -> AppError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict("Category"),
        _ => AppError::from(e),
    }
}

#[async_trait]
impl CategoryRepository for CategoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Category>> {
        let model = category::Entity::find_by_id(id).one(self.db()).await?;
        Ok(model.map(Category::from))
    }

    async fn create(
        &self,
        name: String,
        slug: String,
        description: Option<String>,
    ) -> AppResult<Category> {
        let active = category::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            slug: Set(slug),
            description: Set(description),
            created_at: Set(Utc::now()),
        };

        let model = active.insert(self.db()).await.map_err(map_unique)?;
        Ok(Category::from(model))
    }

    async fn update(&self, category: &Category) -> AppResult<Category> {
        let active = category::ActiveModel {
            id: Set(category.id),
            name: Set(category.name.clone()),
            slug: Set(category.slug.clone()),
            description: Set(category.description.clone()),
            created_at: Set(category.created_at),
        };

        let model = active.update(self.db()).await.map_err(map_unique)?;
        Ok(Category::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = category::Entity::delete_by_id(id).exec(self.db()).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("Category"));
        }
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<Category>> {
        let rows = category::Entity::find()
            .order_by(category::Column::Name, Order::Asc)
            .all(self.db())
            .await?;
        Ok(rows.into_iter().map(Category::from).collect())
    }
}
