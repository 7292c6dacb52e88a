//! Application repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};
use uuid::Uuid;

use crate::domain::{Application, ApplicationStatus, JobStats};
use crate::errors::{AppError, AppResult};

use super::entities::application;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Application persistence operations
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Find an application by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Application>>;

    /// Find the application a user submitted for a job, if any
    async fn find_by_job_and_applicant(
        &self,
        job_id: Uuid,
        applicant_id: Uuid,
    ) -> AppResult<Option<Application>>;

    /// Insert a new PENDING application.
    ///
    /// The (job_id, applicant_id) unique constraint is the authoritative
    /// duplicate guard; a violation surfaces as Conflict.
    async fn create(
        &self,
        job_id: Uuid,
        applicant_id: Uuid,
        cover_letter: Option<String>,
        resume_url: Option<String>,
    ) -> AppResult<Application>;

    /// Transition an application's status
    async fn set_status(&self, id: Uuid, status: ApplicationStatus) -> AppResult<Application>;

    /// A job seeker's applications, newest first
    async fn list_by_applicant(
        &self,
        applicant_id: Uuid,
        page: u64,
        limit: u64,
    ) -> AppResult<(Vec<Application>, u64)>;

    /// Applications submitted for a job, newest first
    async fn list_by_job(
        &self,
        job_id: Uuid,
        page: u64,
        limit: u64,
    ) -> AppResult<(Vec<Application>, u64)>;

    /// Count applications for a job
    async fn count_for_job(&self, job_id: Uuid) -> AppResult<u64>;

    /// Per-status application counts for a job
    async fn stats_for_job(&self, job_id: Uuid) -> AppResult<JobStats>;
}

/// SeaORM-backed application repository
pub struct ApplicationStore {
    db: DatabaseConnection,
}

impl ApplicationStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl ApplicationRepository for ApplicationStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Application>> {
        let model = application::Entity::find_by_id(id).one(self.db()).await?;
        Ok(model.map(Application::from))
    }

    async fn find_by_job_and_applicant(
        &self,
        job_id: Uuid,
        applicant_id: Uuid,
    ) -> AppResult<Option<Application>> {
        let model = application::Entity::find()
            .filter(application::Column::JobId.eq(job_id))
            .filter(application::Column::ApplicantId.eq(applicant_id))
            .one(self.db())
            .await?;
        Ok(model.map(Application::from))
    }

    async fn create(
        &self,
        job_id: Uuid,
        applicant_id: Uuid,
        cover_letter: Option<String>,
        resume_url: Option<String>,
    ) -> AppResult<Application> {
        let now = Utc::now();
        let active = application::ActiveModel {
            id: Set(Uuid::new_v4()),
            job_id: Set(job_id),
            applicant_id: Set(applicant_id),
            status: Set(ApplicationStatus::Pending.to_string()),
            cover_letter: Set(cover_letter),
            resume_url: Set(resume_url),
            applied_at: Set(now),
            updated_at: Set(now),
        };

        let model = active.insert(self.db()).await.map_err(|e| {
            match e.sql_err() {
                // Lost the race past the service pre-check: the constraint
                // is the real guard
                Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict("Application"),
                _ => AppError::from(e),
            }
        })?;

        Ok(Application::from(model))
    }

    async fn set_status(&self, id: Uuid, status: ApplicationStatus) -> AppResult<Application> {
        let model = application::Entity::find_by_id(id)
            .one(self.db())
            .await?
            .ok_or_else(|| AppError::not_found("Application"))?;

        let mut active: application::ActiveModel = model.into();
        active.status = Set(status.to_string());
        active.updated_at = Set(Utc::now());

        let model = active.update(self.db()).await?;
        Ok(Application::from(model))
    }

    async fn list_by_applicant(
        &self,
        applicant_id: Uuid,
        page: u64,
        limit: u64,
    ) -> AppResult<(Vec<Application>, u64)> {
        let base = application::Entity::find()
            .filter(application::Column::ApplicantId.eq(applicant_id));

        let total = base.clone().count(self.db()).await?;
        let rows = base
            .order_by(application::Column::AppliedAt, Order::Desc)
            .offset(page.saturating_sub(1) * limit)
            .limit(limit)
            .all(self.db())
            .await?;

        Ok((rows.into_iter().map(Application::from).collect(), total))
    }

    async fn list_by_job(
        &self,
        job_id: Uuid,
        page: u64,
        limit: u64,
    ) -> AppResult<(Vec<Application>, u64)> {
        let base = application::Entity::find().filter(application::Column::JobId.eq(job_id));

        let total = base.clone().count(self.db()).await?;
        let rows = base
            .order_by(application::Column::AppliedAt, Order::Desc)
            .offset(page.saturating_sub(1) * limit)
            .limit(limit)
            .all(self.db())
            .await?;

        Ok((rows.into_iter().map(Application::from).collect(), total))
    }

    async fn count_for_job(&self, job_id: Uuid) -> AppResult<u64> {
        application::Entity::find()
            .filter(application::Column::JobId.eq(job_id))
            .count(self.db())
            .await
            .map_err(Into::into)
    }

    async fn stats_for_job(&self, job_id: Uuid) -> AppResult<JobStats> {
        let rows: Vec<(String, i64)> = application::Entity::find()
            .select_only()
            .column(application::Column::Status)
            .column_as(application::Column::Id.count(), "count")
            .filter(application::Column::JobId.eq(job_id))
            .group_by(application::Column::Status)
            .into_tuple()
            .all(self.db())
            .await?;

        let mut stats = JobStats::default();
        for (status, count) in rows {
            let count = count as u64;
            match ApplicationStatus::from(status.as_str()) {
                ApplicationStatus::Pending => stats.pending += count,
                ApplicationStatus::Reviewed => stats.reviewed += count,
                ApplicationStatus::Shortlisted => stats.shortlisted += count,
                ApplicationStatus::Accepted => stats.accepted += count,
                ApplicationStatus::Rejected => stats.rejected += count,
            }
            stats.total += count;
        }

        Ok(stats)
    }
}
