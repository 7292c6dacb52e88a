//! Application service - submissions and review workflow.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Actor, Application, ApplicationStatus, CreateApplication, Job, JobStatus};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::types::{Page, PageRequest};

use super::ensure_owner;

/// Application service trait for dependency injection.
#[async_trait]
pub trait ApplicationService: Send + Sync {
    /// Submit an application to an open job (job seekers only, once per job)
    async fn apply_to_job(
        &self,
        actor: &Actor,
        job_id: Uuid,
        data: CreateApplication,
    ) -> AppResult<Application>;

    /// Move an application through the review workflow (job owner only)
    async fn update_status(
        &self,
        actor: &Actor,
        application_id: Uuid,
        new_status: ApplicationStatus,
    ) -> AppResult<Application>;

    /// The actor's own applications, newest first
    async fn my_applications(
        &self,
        actor: &Actor,
        page: &PageRequest,
    ) -> AppResult<Page<Application>>;

    /// Applications received for an owned job
    async fn list_job_applications(
        &self,
        actor: &Actor,
        job_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<Page<Application>>;
}

/// Concrete implementation of ApplicationService using Unit of Work.
pub struct ApplicationManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ApplicationManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Verify the actor owns the company behind a job
    async fn ensure_job_owner(&self, actor: &Actor, job: &Job) -> AppResult<()> {
        let company = self
            .uow
            .companies()
            .find_by_id(job.company_id)
            .await?
            .ok_or_else(|| AppError::internal("job without company"))?;
        ensure_owner(actor, company.owner_id)
    }
}

#[async_trait]
impl<U: UnitOfWork> ApplicationService for ApplicationManager<U> {
    async fn apply_to_job(
        &self,
        actor: &Actor,
        job_id: Uuid,
        data: CreateApplication,
    ) -> AppResult<Application> {
        let job = self
            .uow
            .jobs()
            .find_by_id(job_id)
            .await?
            .ok_or_else(|| AppError::not_found("Job"))?;

        if !actor.role.is_job_seeker() {
            return Err(AppError::Forbidden);
        }

        if job.status != JobStatus::Published {
            return Err(AppError::bad_request("job is not open for applications"));
        }
        // A past-deadline job is closed to applications even before the
        // sweep marks it EXPIRED
        if job.is_expired_at(Utc::now()) {
            return Err(AppError::bad_request("job posting has expired"));
        }

        // Friendly pre-check; the unique constraint is the real guard and
        // turns a lost race into the same Conflict
        if self
            .uow
            .applications()
            .find_by_job_and_applicant(job.id, actor.id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Application"));
        }

        self.uow
            .applications()
            .create(job.id, actor.id, data.cover_letter, data.resume_url)
            .await
    }

    async fn update_status(
        &self,
        actor: &Actor,
        application_id: Uuid,
        new_status: ApplicationStatus,
    ) -> AppResult<Application> {
        let application = self
            .uow
            .applications()
            .find_by_id(application_id)
            .await?
            .ok_or_else(|| AppError::not_found("Application"))?;

        let job = self
            .uow
            .jobs()
            .find_by_id(application.job_id)
            .await?
            .ok_or_else(|| AppError::internal("application without job"))?;
        self.ensure_job_owner(actor, &job).await?;

        if application.status.is_terminal() {
            return Err(AppError::bad_request(format!(
                "application is already {}",
                application.status
            )));
        }

        self.uow
            .applications()
            .set_status(application.id, new_status)
            .await
    }

    async fn my_applications(
        &self,
        actor: &Actor,
        page: &PageRequest,
    ) -> AppResult<Page<Application>> {
        let (items, total) = self
            .uow
            .applications()
            .list_by_applicant(actor.id, page.page(), page.limit())
            .await?;
        Ok(Page::new(items, total, page.page(), page.limit()))
    }

    async fn list_job_applications(
        &self,
        actor: &Actor,
        job_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<Page<Application>> {
        let job = self
            .uow
            .jobs()
            .find_by_id(job_id)
            .await?
            .ok_or_else(|| AppError::not_found("Job"))?;
        self.ensure_job_owner(actor, &job).await?;

        let (items, total) = self
            .uow
            .applications()
            .list_by_job(job.id, page.page(), page.limit())
            .await?;
        Ok(Page::new(items, total, page.page(), page.limit()))
    }
}
