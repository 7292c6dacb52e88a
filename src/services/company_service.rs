//! Company service - employer company profiles.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Actor, Company, CompanySize, CreateCompany, UpdateCompany};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{Page, PageRequest};

use super::ensure_owner;

/// Company service trait for dependency injection.
#[async_trait]
pub trait CompanyService: Send + Sync {
    /// Create the employer's company (one per owner, unique name)
    async fn create_company(&self, actor: &Actor, data: CreateCompany) -> AppResult<Company>;

    /// Update an owned company
    async fn update_company(
        &self,
        actor: &Actor,
        id: Uuid,
        data: UpdateCompany,
    ) -> AppResult<Company>;

    /// Fetch one company (public)
    async fn get_company(&self, id: Uuid) -> AppResult<Company>;

    /// List companies alphabetically (public)
    async fn list_companies(&self, page: &PageRequest) -> AppResult<Page<Company>>;

    /// Delete an owned company that has no jobs
    async fn delete_company(&self, actor: &Actor, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of CompanyService using Unit of Work.
pub struct CompanyManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CompanyManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn owned_company(&self, actor: &Actor, id: Uuid) -> AppResult<Company> {
        let company = self
            .uow
            .companies()
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Company"))?;
        ensure_owner(actor, company.owner_id)?;
        Ok(company)
    }
}

fn validate_founded_at(founded_at: Option<chrono::NaiveDate>) -> AppResult<()> {
    if let Some(date) = founded_at {
        if date > Utc::now().date_naive() {
            return Err(AppError::validation("founded_at must not be in the future"));
        }
    }
    Ok(())
}

#[async_trait]
impl<U: UnitOfWork> CompanyService for CompanyManager<U> {
    async fn create_company(&self, actor: &Actor, data: CreateCompany) -> AppResult<Company> {
        if !actor.role.is_employer() {
            return Err(AppError::Forbidden);
        }

        if self.uow.companies().find_by_owner(actor.id).await?.is_some() {
            return Err(AppError::conflict("Company"));
        }

        if self.uow.companies().name_taken(&data.name, None).await? {
            return Err(AppError::conflict("Company"));
        }

        let size = data.size.as_deref().map(CompanySize::parse).transpose()?;
        validate_founded_at(data.founded_at)?;

        let now = Utc::now();
        let company = Company {
            id: Uuid::new_v4(),
            name: data.name,
            description: data.description,
            website: data.website,
            industry: data.industry,
            size,
            location: data.location,
            founded_at: data.founded_at,
            owner_id: actor.id,
            created_at: now,
            updated_at: now,
        };

        self.uow.companies().create(&company).await
    }

    async fn update_company(
        &self,
        actor: &Actor,
        id: Uuid,
        data: UpdateCompany,
    ) -> AppResult<Company> {
        let mut company = self.owned_company(actor, id).await?;

        if let Some(name) = data.name {
            if self.uow.companies().name_taken(&name, Some(id)).await? {
                return Err(AppError::conflict("Company"));
            }
            company.name = name;
        }
        if let Some(description) = data.description {
            company.description = Some(description);
        }
        if let Some(website) = data.website {
            company.website = Some(website);
        }
        if let Some(industry) = data.industry {
            company.industry = Some(industry);
        }
        if let Some(size) = data.size.as_deref() {
            company.size = Some(CompanySize::parse(size)?);
        }
        if let Some(location) = data.location {
            company.location = Some(location);
        }
        if let Some(founded_at) = data.founded_at {
            validate_founded_at(Some(founded_at))?;
            company.founded_at = Some(founded_at);
        }

        self.uow.companies().update(&company).await
    }

    async fn get_company(&self, id: Uuid) -> AppResult<Company> {
        self.uow.companies().find_by_id(id).await?.ok_or_not_found("Company")
    }

    async fn list_companies(&self, page: &PageRequest) -> AppResult<Page<Company>> {
        let (items, total) = self
            .uow
            .companies()
            .list(page.page(), page.limit())
            .await?;
        Ok(Page::new(items, total, page.page(), page.limit()))
    }

    async fn delete_company(&self, actor: &Actor, id: Uuid) -> AppResult<()> {
        let company = self.owned_company(actor, id).await?;

        let jobs = self.uow.jobs().count_for_company(company.id).await?;
        if jobs > 0 {
            return Err(AppError::validation("company still has jobs"));
        }

        self.uow.companies().delete(company.id).await
    }
}
