//! Job repository: persistence and query lowering for job postings.
//!
//! The search path lowers a compiled predicate tree to a SeaORM condition
//! and runs the paged fetch and the count from that same condition.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{ColumnRef, Expr, IntoColumnRef, Query, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::domain::{Job, JobDetail, JobSkillDetail, JobStatus, JobSummary};
use crate::errors::{AppError, AppResult};
use crate::query::{CompiledQuery, Field, Ordering, Predicate, Scalar, SortDirection, SortKey};

use super::entities::{company, job, job_skill, skill};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Job persistence operations
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Find a job by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Job>>;

    /// Find a job with its company name and skill associations
    async fn find_detail(&self, id: Uuid) -> AppResult<Option<JobDetail>>;

    /// Run a compiled search: paged fetch and total count share the predicate
    async fn search(
        &self,
        query: &CompiledQuery,
        page: u64,
        limit: u64,
    ) -> AppResult<(Vec<JobSummary>, u64)>;

    /// List a company's jobs regardless of status, newest first
    async fn list_by_company(
        &self,
        company_id: Uuid,
        page: u64,
        limit: u64,
    ) -> AppResult<(Vec<JobSummary>, u64)>;

    /// Set a job's lifecycle status
    async fn set_status(&self, id: Uuid, status: JobStatus) -> AppResult<Job>;

    /// Hard delete; job_skills rows cascade at the storage layer
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Count jobs belonging to a company
    async fn count_for_company(&self, company_id: Uuid) -> AppResult<u64>;

    /// Count jobs referencing a category
    async fn count_for_category(&self, category_id: Uuid) -> AppResult<u64>;

    /// Flip all published jobs past their expiry to EXPIRED; returns the
    /// number of rows mutated (idempotent)
    async fn expire_published(&self, now: DateTime<Utc>) -> AppResult<u64>;
}

/// SeaORM-backed job repository
pub struct JobStore {
    db: DatabaseConnection,
}

impl JobStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl JobRepository for JobStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Job>> {
        let model = job::Entity::find_by_id(id).one(self.db()).await?;
        Ok(model.map(Job::from))
    }

    async fn find_detail(&self, id: Uuid) -> AppResult<Option<JobDetail>> {
        let Some((model, owner)) = job::Entity::find_by_id(id)
            .find_also_related(company::Entity)
            .one(self.db())
            .await?
        else {
            return Ok(None);
        };

        let skills = job_skill::Entity::find()
            .filter(job_skill::Column::JobId.eq(id))
            .find_also_related(skill::Entity)
            .all(self.db())
            .await?
            .into_iter()
            .filter_map(|(assoc, skill)| {
                skill.map(|skill| JobSkillDetail {
                    skill_id: assoc.skill_id,
                    name: skill.name,
                    is_required: assoc.is_required,
                })
            })
            .collect();

        Ok(Some(JobDetail {
            job: Job::from(model),
            company_name: owner.map(|c| c.name),
            skills,
        }))
    }

    async fn search(
        &self,
        query: &CompiledQuery,
        page: u64,
        limit: u64,
    ) -> AppResult<(Vec<JobSummary>, u64)> {
        let base = job::Entity::find()
            .find_also_related(company::Entity)
            .filter(lower(&query.predicate));

        // Same predicate for both queries: the total always matches the
        // page's universe.
        let total = base.clone().count(self.db()).await?;

        let rows = base
            .order_by(sort_expr(query.ordering.key), sort_order(query.ordering))
            .offset(page.saturating_sub(1) * limit)
            .limit(limit)
            .all(self.db())
            .await?;

        let items = rows
            .into_iter()
            .map(|(model, owner)| job::to_summary(model, owner.map(|c| c.name)))
            .collect();

        Ok((items, total))
    }

    async fn list_by_company(
        &self,
        company_id: Uuid,
        page: u64,
        limit: u64,
    ) -> AppResult<(Vec<JobSummary>, u64)> {
        let base = job::Entity::find()
            .find_also_related(company::Entity)
            .filter(job::Column::CompanyId.eq(company_id));

        let total = base.clone().count(self.db()).await?;

        let rows = base
            .order_by(job::Column::CreatedAt, Order::Desc)
            .offset(page.saturating_sub(1) * limit)
            .limit(limit)
            .all(self.db())
            .await?;

        let items = rows
            .into_iter()
            .map(|(model, owner)| job::to_summary(model, owner.map(|c| c.name)))
            .collect();

        Ok((items, total))
    }

    async fn set_status(&self, id: Uuid, status: JobStatus) -> AppResult<Job> {
        let model = job::Entity::find_by_id(id)
            .one(self.db())
            .await?
            .ok_or_else(|| AppError::not_found("Job"))?;

        let mut active: job::ActiveModel = model.into();
        active.status = Set(status.to_string());
        active.updated_at = Set(Utc::now());

        let model = active.update(self.db()).await?;
        Ok(Job::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = job::Entity::delete_by_id(id).exec(self.db()).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("Job"));
        }
        Ok(())
    }

    async fn count_for_company(&self, company_id: Uuid) -> AppResult<u64> {
        job::Entity::find()
            .filter(job::Column::CompanyId.eq(company_id))
            .count(self.db())
            .await
            .map_err(Into::into)
    }

    async fn count_for_category(&self, category_id: Uuid) -> AppResult<u64> {
        job::Entity::find()
            .filter(job::Column::CategoryId.eq(category_id))
            .count(self.db())
            .await
            .map_err(Into::into)
    }

    async fn expire_published(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result = job::Entity::update_many()
            .col_expr(
                job::Column::Status,
                Expr::value(JobStatus::Expired.to_string()),
            )
            .col_expr(job::Column::UpdatedAt, Expr::value(now))
            .filter(job::Column::Status.eq(JobStatus::Published.as_str()))
            .filter(job::Column::ExpiresAt.lte(now))
            .exec(self.db())
            .await?;

        Ok(result.rows_affected)
    }
}

// =============================================================================
// Predicate lowering
// =============================================================================

/// Lower a predicate tree to a SeaORM condition.
///
/// `CompanyName` resolves against the joined companies table; `SkillId`
/// becomes an `IN (SELECT job_id FROM job_skills ...)` subquery so that a
/// job with several matching skills still yields a single row.
fn lower(predicate: &Predicate) -> Condition {
    match predicate {
        Predicate::And(children) => children
            .iter()
            .fold(Condition::all(), |cond, child| cond.add(lower(child))),
        Predicate::Or(children) => children
            .iter()
            .fold(Condition::any(), |cond, child| cond.add(lower(child))),
        leaf => Condition::all().add(lower_leaf(leaf)),
    }
}

fn lower_leaf(predicate: &Predicate) -> SimpleExpr {
    match predicate {
        Predicate::Equals(field, value) => {
            if *field == Field::SkillId {
                return skill_subquery(std::slice::from_ref(value));
            }
            Expr::col(column(*field)).eq(scalar(value))
        }
        Predicate::Contains(field, term) => {
            Expr::col(column(*field)).ilike(format!("%{}%", escape_like(term)))
        }
        Predicate::Range { field, min, max } => {
            let col = column(*field);
            match (min, max) {
                (Some(min), Some(max)) => Expr::col(col.clone())
                    .gte(scalar(min))
                    .and(Expr::col(col).lte(scalar(max))),
                (Some(min), None) => Expr::col(col).gte(scalar(min)),
                (None, Some(max)) => Expr::col(col).lte(scalar(max)),
                (None, None) => Expr::value(true),
            }
        }
        Predicate::OneOf(field, values) => {
            if *field == Field::SkillId {
                return skill_subquery(values);
            }
            Expr::col(column(*field)).is_in(values.iter().map(scalar))
        }
        Predicate::IsNull(field) => Expr::col(column(*field)).is_null(),
        Predicate::After(field, at) => Expr::col(column(*field)).gt(*at),
        // Branch nodes handled by `lower`
        Predicate::And(_) | Predicate::Or(_) => unreachable!("branch node in leaf position"),
    }
}

fn column(field: Field) -> ColumnRef {
    let col = match field {
        Field::Title => job::Column::Title,
        Field::Description => job::Column::Description,
        Field::Requirements => job::Column::Requirements,
        Field::Responsibilities => job::Column::Responsibilities,
        Field::JobType => job::Column::JobType,
        Field::ExperienceLevel => job::Column::ExperienceLevel,
        Field::Location => job::Column::Location,
        Field::IsRemote => job::Column::IsRemote,
        Field::SalaryMin => job::Column::SalaryMin,
        Field::SalaryMax => job::Column::SalaryMax,
        Field::Status => job::Column::Status,
        Field::ExpiresAt => job::Column::ExpiresAt,
        Field::CategoryId => job::Column::CategoryId,
        // Resolved against the joined companies table
        Field::CompanyName => {
            return (company::Entity, company::Column::Name).into_column_ref();
        }
        // Only reachable via the IN-subquery path
        Field::SkillId => unreachable!("skill filters lower to a subquery"),
    };
    (job::Entity, col).into_column_ref()
}

fn scalar(value: &Scalar) -> sea_orm::Value {
    match value {
        Scalar::Str(v) => v.clone().into(),
        Scalar::Int(v) => (*v).into(),
        Scalar::Bool(v) => (*v).into(),
        Scalar::Uuid(v) => (*v).into(),
        Scalar::Time(v) => (*v).into(),
    }
}

fn skill_subquery(values: &[Scalar]) -> SimpleExpr {
    let sub = Query::select()
        .column(job_skill::Column::JobId)
        .from(job_skill::Entity)
        .and_where(Expr::col(job_skill::Column::SkillId).is_in(values.iter().map(scalar)))
        .to_owned();

    Expr::col((job::Entity, job::Column::Id)).in_subquery(sub)
}

/// Escape LIKE wildcards so a search term matches literally
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn sort_expr(key: SortKey) -> SimpleExpr {
    let col = match key {
        SortKey::CreatedAt => (job::Entity, job::Column::CreatedAt).into_column_ref(),
        SortKey::UpdatedAt => (job::Entity, job::Column::UpdatedAt).into_column_ref(),
        SortKey::Title => (job::Entity, job::Column::Title).into_column_ref(),
        SortKey::Salary => (job::Entity, job::Column::SalaryMax).into_column_ref(),
        SortKey::ExpiresAt => (job::Entity, job::Column::ExpiresAt).into_column_ref(),
        SortKey::ExperienceLevel => (job::Entity, job::Column::ExperienceLevel).into_column_ref(),
        SortKey::Company => (company::Entity, company::Column::Name).into_column_ref(),
    };
    SimpleExpr::Column(col)
}

fn sort_order(ordering: Ordering) -> Order {
    match ordering.direction {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    }
}
