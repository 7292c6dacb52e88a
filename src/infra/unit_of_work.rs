//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and manages transaction lifecycle. The
//! multi-statement writes (job creation/update with its skill rows, user
//! skill replacement) run through [`TransactionContext`] so a partial write
//! is never observable.

use async_trait::async_trait;
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, IsolationLevel, QueryFilter, Set, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::repositories::entities::{job, job_skill, user_skill};
use super::repositories::{
    ApplicationRepository, ApplicationStore, CategoryRepository, CategoryStore, CompanyRepository,
    CompanyStore, JobRepository, JobStore, SkillRepository, SkillStore, UserRepository, UserStore,
};
use crate::domain::{Job, JobSkill, UserSkill};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Provides centralized access to all repositories and transaction
/// management. Generic methods keep this trait unmockable; tests mock the
/// individual repositories instead.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn jobs(&self) -> Arc<dyn JobRepository>;
    fn companies(&self) -> Arc<dyn CompanyRepository>;
    fn users(&self) -> Arc<dyn UserRepository>;
    fn applications(&self) -> Arc<dyn ApplicationRepository>;
    fn categories(&self) -> Arc<dyn CategoryRepository>;
    fn skills(&self) -> Arc<dyn SkillRepository>;

    /// Execute a closure within a transaction.
    ///
    /// Committed on success, rolled back on error. ReadCommitted isolation.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Repository access within one transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Transaction-scoped job writes
    pub fn jobs(&self) -> TxJobRepository<'_> {
        TxJobRepository::new(self.txn)
    }

    /// Transaction-scoped user writes
    pub fn users(&self) -> TxUserRepository<'_> {
        TxUserRepository::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    jobs: Arc<JobStore>,
    companies: Arc<CompanyStore>,
    users: Arc<UserStore>,
    applications: Arc<ApplicationStore>,
    categories: Arc<CategoryStore>,
    skills: Arc<SkillStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            jobs: Arc::new(JobStore::new(db.clone())),
            companies: Arc::new(CompanyStore::new(db.clone())),
            users: Arc::new(UserStore::new(db.clone())),
            applications: Arc::new(ApplicationStore::new(db.clone())),
            categories: Arc::new(CategoryStore::new(db.clone())),
            skills: Arc::new(SkillStore::new(db.clone())),
            db,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn jobs(&self) -> Arc<dyn JobRepository> {
        self.jobs.clone()
    }

    fn companies(&self) -> Arc<dyn CompanyRepository> {
        self.companies.clone()
    }

    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn applications(&self) -> Arc<dyn ApplicationRepository> {
        self.applications.clone()
    }

    fn categories(&self) -> Arc<dyn CategoryRepository> {
        self.categories.clone()
    }

    fn skills(&self) -> Arc<dyn SkillRepository> {
        self.skills.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(
                Some(IsolationLevel::ReadCommitted),
                Some(AccessMode::ReadWrite),
            )
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Transaction-aware job repository covering the multi-statement writes.
pub struct TxJobRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxJobRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Insert a job together with its skill associations
    pub async fn create(&self, new_job: &Job, skills: &[JobSkill]) -> AppResult<Job> {
        let model = job::ActiveModel::from(new_job)
            .insert(self.txn)
            .await
            .map_err(AppError::from)?;

        self.insert_skills(model.id, skills).await?;

        Ok(Job::from(model))
    }

    /// Full-row update; `skills` of Some replaces the whole association set
    pub async fn update(&self, updated: &Job, skills: Option<&[JobSkill]>) -> AppResult<Job> {
        let model = job::ActiveModel::from(updated)
            .update(self.txn)
            .await
            .map_err(AppError::from)?;

        if let Some(skills) = skills {
            job_skill::Entity::delete_many()
                .filter(job_skill::Column::JobId.eq(model.id))
                .exec(self.txn)
                .await?;
            self.insert_skills(model.id, skills).await?;
        }

        Ok(Job::from(model))
    }

    async fn insert_skills(&self, job_id: Uuid, skills: &[JobSkill]) -> AppResult<()> {
        if skills.is_empty() {
            return Ok(());
        }
        let rows = skills.iter().map(|s| job_skill::ActiveModel {
            job_id: Set(job_id),
            skill_id: Set(s.skill_id),
            is_required: Set(s.is_required),
        });
        job_skill::Entity::insert_many(rows).exec(self.txn).await?;
        Ok(())
    }
}

/// Transaction-aware user repository covering skill replacement.
pub struct TxUserRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxUserRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Replace the user's whole skill set
    pub async fn replace_skills(&self, user_id: Uuid, skills: &[UserSkill]) -> AppResult<()> {
        user_skill::Entity::delete_many()
            .filter(user_skill::Column::UserId.eq(user_id))
            .exec(self.txn)
            .await?;

        if skills.is_empty() {
            return Ok(());
        }
        let rows = skills.iter().map(|s| user_skill::ActiveModel {
            user_id: Set(user_id),
            skill_id: Set(s.skill_id),
            proficiency: Set(s.proficiency.to_string()),
        });
        user_skill::Entity::insert_many(rows).exec(self.txn).await?;
        Ok(())
    }
}

/// Helper macro reducing transaction boilerplate at call sites.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
