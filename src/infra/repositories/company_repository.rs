//! Company repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};
use uuid::Uuid;

use crate::domain::Company;
use crate::errors::{AppError, AppResult};

use super::entities::company;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Company persistence operations
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Find a company by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Company>>;

    /// Find the company owned by a user, if any
    async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Option<Company>>;

    /// Case-insensitive name lookup, optionally excluding one company
    /// (used when renaming)
    async fn name_taken(&self, name: &str, exclude: Option<Uuid>) -> AppResult<bool>;

    /// Insert a new company
    async fn create(&self, company: &Company) -> AppResult<Company>;

    /// Full-row update
    async fn update(&self, company: &Company) -> AppResult<Company>;

    /// Hard delete
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// List companies alphabetically
    async fn list(&self, page: u64, limit: u64) -> AppResult<(Vec<Company>, u64)>;
}

/// SeaORM-backed company repository
pub struct CompanyStore {
    db: DatabaseConnection,
}

impl CompanyStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

fn to_active(company: &Company) -> company::ActiveModel {
    company::ActiveModel {
        id: Set(company.id),
        name: Set(company.name.clone()),
        description: Set(company.description.clone()),
        website: Set(company.website.clone()),
        industry: Set(company.industry.clone()),
        size: Set(company.size.map(|s| s.to_string())),
        location: Set(company.location.clone()),
        founded_at: Set(company.founded_at),
        owner_id: Set(company.owner_id),
        created_at: Set(company.created_at),
        updated_at: Set(Utc::now()),
    }
}

fn map_unique(e: sea_orm::DbErr) -> AppError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict("Company"),
        _ => AppError::from(e),
    }
}

#[async_trait]
impl CompanyRepository for CompanyStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Company>> {
        let model = company::Entity::find_by_id(id).one(self.db()).await?;
        Ok(model.map(Company::from))
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Option<Company>> {
        let model = company::Entity::find()
            .filter(company::Column::OwnerId.eq(owner_id))
            .one(self.db())
            .await?;
        Ok(model.map(Company::from))
    }

    async fn name_taken(&self, name: &str, exclude: Option<Uuid>) -> AppResult<bool> {
        let mut query = company::Entity::find().filter(
            Expr::expr(Func::lower(Expr::col(company::Column::Name))).eq(name.to_lowercase()),
        );
        if let Some(id) = exclude {
            query = query.filter(company::Column::Id.ne(id));
        }
        Ok(query.count(self.db()).await? > 0)
    }

    async fn create(&self, company: &Company) -> AppResult<Company> {
        let model = to_active(company).insert(self.db()).await.map_err(map_unique)?;
        Ok(Company::from(model))
    }

    async fn update(&self, company: &Company) -> AppResult<Company> {
        let model = to_active(company).update(self.db()).await.map_err(map_unique)?;
        Ok(Company::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = company::Entity::delete_by_id(id).exec(self.db()).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("Company"));
        }
        Ok(())
    }

    async fn list(&self, page: u64, limit: u64) -> AppResult<(Vec<Company>, u64)> {
        let base = company::Entity::find();

        let total = base.clone().count(self.db()).await?;
        let rows = base
            .order_by(company::Column::Name, Order::Asc)
            .offset(page.saturating_sub(1) * limit)
            .limit(limit)
            .all(self.db())
            .await?;

        Ok((rows.into_iter().map(Company::from).collect(), total))
    }
}
