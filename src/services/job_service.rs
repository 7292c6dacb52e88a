//! Job service - posting lifecycle, search and the expiry sweep.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    Actor, Company, CreateJob, ExperienceLevel, Job, JobDetail, JobSkill, JobStats, JobStatus,
    JobSummary, JobType, UpdateJob,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::query::{compile, JobFilter};
use crate::types::{Page, PageRequest};
use crate::with_transaction;

use super::ensure_owner;

/// Job service trait for dependency injection.
#[async_trait]
pub trait JobService: Send + Sync {
    /// Create a DRAFT job under the employer's company, with its skill
    /// associations written atomically
    async fn create_job(&self, actor: &Actor, data: CreateJob) -> AppResult<Job>;

    /// Update an owned job; a supplied skill list replaces the whole set
    async fn update_job(&self, actor: &Actor, id: Uuid, data: UpdateJob) -> AppResult<Job>;

    /// Publish an owned, not-yet-published job
    async fn publish_job(&self, actor: &Actor, id: Uuid) -> AppResult<Job>;

    /// Close an owned, not-yet-closed job
    async fn close_job(&self, actor: &Actor, id: Uuid) -> AppResult<Job>;

    /// Delete an owned job with no applications
    async fn delete_job(&self, actor: &Actor, id: Uuid) -> AppResult<()>;

    /// Fetch one job; drafts and closed/expired jobs are visible to the
    /// owning side only
    async fn get_job(&self, actor: Option<&Actor>, id: Uuid) -> AppResult<JobDetail>;

    /// Public search across open jobs
    async fn search_jobs(
        &self,
        filter: JobFilter,
        page: &PageRequest,
    ) -> AppResult<Page<JobSummary>>;

    /// The employer's own listings, any status
    async fn list_my_jobs(&self, actor: &Actor, page: &PageRequest)
        -> AppResult<Page<JobSummary>>;

    /// Application counts per status for an owned job
    async fn job_stats(&self, actor: &Actor, id: Uuid) -> AppResult<JobStats>;

    /// Flip published jobs past their expiry to EXPIRED; returns the count
    async fn expire_old_jobs(&self) -> AppResult<u64>;
}

/// Concrete implementation of JobService using Unit of Work.
pub struct JobManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> JobManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Load a job and its owning company, verifying the actor owns it
    async fn owned_job(&self, actor: &Actor, id: Uuid) -> AppResult<(Job, Company)> {
        let job = self
            .uow
            .jobs()
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Job"))?;
        let company = self
            .uow
            .companies()
            .find_by_id(job.company_id)
            .await?
            .ok_or_else(|| AppError::internal("job without company"))?;
        ensure_owner(actor, company.owner_id)?;
        Ok((job, company))
    }

    async fn validate_category(&self, category_id: Option<Uuid>) -> AppResult<()> {
        if let Some(id) = category_id {
            self.uow
                .categories()
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::not_found("Category"))?;
        }
        Ok(())
    }

    async fn validate_skills(&self, skills: &[JobSkill]) -> AppResult<()> {
        if skills.is_empty() {
            return Ok(());
        }

        let mut seen = HashSet::new();
        for skill in skills {
            if !seen.insert(skill.skill_id) {
                return Err(AppError::validation("duplicate skill in skill list"));
            }
        }

        let ids: Vec<Uuid> = skills.iter().map(|s| s.skill_id).collect();
        let found = self.uow.skills().find_existing_ids(ids.clone()).await?;
        if found.len() != ids.len() {
            return Err(AppError::not_found("Skill"));
        }
        Ok(())
    }
}

fn validate_salary_range(min: Option<i64>, max: Option<i64>) -> AppResult<()> {
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(AppError::validation(
                "salary_min must not exceed salary_max",
            ));
        }
    }
    Ok(())
}

#[async_trait]
impl<U: UnitOfWork> JobService for JobManager<U> {
    async fn create_job(&self, actor: &Actor, data: CreateJob) -> AppResult<Job> {
        if !actor.role.is_employer() {
            return Err(AppError::Forbidden);
        }

        let company = self
            .uow
            .companies()
            .find_by_owner(actor.id)
            .await?
            .ok_or_else(|| AppError::bad_request("create a company profile before posting jobs"))?;

        let job_type = JobType::parse(&data.job_type)?;
        let experience_level = ExperienceLevel::parse(&data.experience_level)?;
        validate_salary_range(data.salary_min, data.salary_max)?;

        let now = Utc::now();
        if let Some(expires_at) = data.expires_at {
            if expires_at <= now {
                return Err(AppError::validation("expires_at must be in the future"));
            }
        }

        self.validate_category(data.category_id).await?;
        self.validate_skills(&data.skills).await?;

        let job = Job {
            id: Uuid::new_v4(),
            title: data.title,
            description: data.description,
            requirements: data.requirements,
            responsibilities: data.responsibilities,
            job_type,
            experience_level,
            salary_min: data.salary_min,
            salary_max: data.salary_max,
            currency: data.currency,
            location: data.location,
            is_remote: data.is_remote,
            application_email: data.application_email,
            application_url: data.application_url,
            status: JobStatus::Draft,
            expires_at: data.expires_at,
            company_id: company.id,
            posted_by: actor.id,
            category_id: data.category_id,
            created_at: now,
            updated_at: now,
        };

        let skills = data.skills;
        with_transaction!(self.uow, |ctx| ctx.jobs().create(&job, &skills).await)
    }

    async fn update_job(&self, actor: &Actor, id: Uuid, data: UpdateJob) -> AppResult<Job> {
        let (mut job, _company) = self.owned_job(actor, id).await?;

        if let Some(title) = data.title {
            job.title = title;
        }
        if let Some(description) = data.description {
            job.description = description;
        }
        if let Some(requirements) = data.requirements {
            job.requirements = Some(requirements);
        }
        if let Some(responsibilities) = data.responsibilities {
            job.responsibilities = Some(responsibilities);
        }
        if let Some(job_type) = data.job_type.as_deref() {
            job.job_type = JobType::parse(job_type)?;
        }
        if let Some(level) = data.experience_level.as_deref() {
            job.experience_level = ExperienceLevel::parse(level)?;
        }
        if let Some(min) = data.salary_min {
            job.salary_min = Some(min);
        }
        if let Some(max) = data.salary_max {
            job.salary_max = Some(max);
        }
        if let Some(currency) = data.currency {
            job.currency = Some(currency);
        }
        if let Some(location) = data.location {
            job.location = Some(location);
        }
        if let Some(is_remote) = data.is_remote {
            job.is_remote = is_remote;
        }
        if let Some(email) = data.application_email {
            job.application_email = Some(email);
        }
        if let Some(url) = data.application_url {
            job.application_url = Some(url);
        }
        if let Some(expires_at) = data.expires_at {
            if expires_at <= Utc::now() {
                return Err(AppError::validation("expires_at must be in the future"));
            }
            job.expires_at = Some(expires_at);
        }
        if let Some(category_id) = data.category_id {
            self.validate_category(Some(category_id)).await?;
            job.category_id = Some(category_id);
        }

        validate_salary_range(job.salary_min, job.salary_max)?;

        if let Some(skills) = &data.skills {
            self.validate_skills(skills).await?;
        }

        let skills = data.skills;
        with_transaction!(self.uow, |ctx| {
            ctx.jobs().update(&job, skills.as_deref()).await
        })
    }

    async fn publish_job(&self, actor: &Actor, id: Uuid) -> AppResult<Job> {
        let (job, _) = self.owned_job(actor, id).await?;
        if job.status == JobStatus::Published {
            return Err(AppError::bad_request("job is already published"));
        }
        self.uow.jobs().set_status(id, JobStatus::Published).await
    }

    async fn close_job(&self, actor: &Actor, id: Uuid) -> AppResult<Job> {
        let (job, _) = self.owned_job(actor, id).await?;
        if job.status == JobStatus::Closed {
            return Err(AppError::bad_request("job is already closed"));
        }
        self.uow.jobs().set_status(id, JobStatus::Closed).await
    }

    async fn delete_job(&self, actor: &Actor, id: Uuid) -> AppResult<()> {
        let (job, _) = self.owned_job(actor, id).await?;

        let applications = self.uow.applications().count_for_job(job.id).await?;
        if applications > 0 {
            return Err(AppError::validation(
                "job has applications and can only be closed",
            ));
        }

        self.uow.jobs().delete(job.id).await
    }

    async fn get_job(&self, actor: Option<&Actor>, id: Uuid) -> AppResult<JobDetail> {
        let detail = self
            .uow
            .jobs()
            .find_detail(id)
            .await?
            .ok_or_else(|| AppError::not_found("Job"))?;

        if detail.job.is_open_at(Utc::now()) {
            return Ok(detail);
        }

        // Not publicly visible: only the owning side may see it
        let actor = actor.ok_or_else(|| AppError::not_found("Job"))?;
        let company = self
            .uow
            .companies()
            .find_by_id(detail.job.company_id)
            .await?
            .ok_or_else(|| AppError::internal("job without company"))?;
        ensure_owner(actor, company.owner_id).map_err(|_| AppError::not_found("Job"))?;

        Ok(detail)
    }

    async fn search_jobs(
        &self,
        filter: JobFilter,
        page: &PageRequest,
    ) -> AppResult<Page<JobSummary>> {
        // One `now` per request: fetch and count share the expiry cutoff
        let compiled = compile(&filter, Utc::now())?;

        let (items, total) = self
            .uow
            .jobs()
            .search(&compiled, page.page(), page.limit())
            .await?;

        Ok(Page::new(items, total, page.page(), page.limit()))
    }

    async fn list_my_jobs(
        &self,
        actor: &Actor,
        page: &PageRequest,
    ) -> AppResult<Page<JobSummary>> {
        let company = self
            .uow
            .companies()
            .find_by_owner(actor.id)
            .await?
            .ok_or_else(|| AppError::bad_request("no company profile"))?;

        let (items, total) = self
            .uow
            .jobs()
            .list_by_company(company.id, page.page(), page.limit())
            .await?;

        Ok(Page::new(items, total, page.page(), page.limit()))
    }

    async fn job_stats(&self, actor: &Actor, id: Uuid) -> AppResult<JobStats> {
        let (job, _) = self.owned_job(actor, id).await?;
        self.uow.applications().stats_for_job(job.id).await
    }

    async fn expire_old_jobs(&self) -> AppResult<u64> {
        let expired = self.uow.jobs().expire_published(Utc::now()).await?;
        if expired > 0 {
            tracing::info!(count = expired, "expired published jobs past their deadline");
        }
        Ok(expired)
    }
}
