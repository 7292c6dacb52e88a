//! Job service unit tests against mocked repositories.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use mockall::predicate::eq;
use uuid::Uuid;

use jobboard::domain::{
    Actor, Company, CreateJob, ExperienceLevel, Job, JobStatus, JobType, UserRole,
};
use jobboard::errors::{AppError, AppResult};
use jobboard::infra::{
    ApplicationRepository, CategoryRepository, CompanyRepository, JobRepository,
    MockApplicationRepository, MockCategoryRepository, MockCompanyRepository, MockJobRepository,
    MockSkillRepository, MockUserRepository, SkillRepository, TransactionContext, UnitOfWork,
    UserRepository,
};
use jobboard::services::{JobManager, JobService};
use jobboard::types::PageRequest;

/// Unit-of-work over mock repositories; transactions are unsupported, so
/// these tests cover the non-transactional paths.
struct TestUnitOfWork {
    jobs: Arc<MockJobRepository>,
    companies: Arc<MockCompanyRepository>,
    users: Arc<MockUserRepository>,
    applications: Arc<MockApplicationRepository>,
    categories: Arc<MockCategoryRepository>,
    skills: Arc<MockSkillRepository>,
}

impl TestUnitOfWork {
    fn empty() -> Self {
        Self {
            jobs: Arc::new(MockJobRepository::new()),
            companies: Arc::new(MockCompanyRepository::new()),
            users: Arc::new(MockUserRepository::new()),
            applications: Arc::new(MockApplicationRepository::new()),
            categories: Arc::new(MockCategoryRepository::new()),
            skills: Arc::new(MockSkillRepository::new()),
        }
    }
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
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

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}

fn employer(id: Uuid) -> Actor {
    Actor {
        id,
        email: "employer@example.com".to_string(),
        role: UserRole::Employer,
    }
}

fn test_company(id: Uuid, owner_id: Uuid) -> Company {
    Company {
        id,
        name: "Acme Inc".to_string(),
        description: None,
        website: None,
        industry: None,
        size: None,
        location: None,
        founded_at: None,
        owner_id,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn test_job(id: Uuid, company_id: Uuid, status: JobStatus) -> Job {
    let now = Utc::now();
    Job {
        id,
        title: "Backend Engineer".to_string(),
        description: "Build services".to_string(),
        requirements: None,
        responsibilities: None,
        job_type: JobType::FullTime,
        experience_level: ExperienceLevel::Mid,
        salary_min: Some(3000),
        salary_max: Some(6000),
        currency: Some("EUR".to_string()),
        location: Some("Berlin".to_string()),
        is_remote: false,
        application_email: None,
        application_url: None,
        status,
        expires_at: None,
        company_id,
        posted_by: Uuid::new_v4(),
        category_id: None,
        created_at: now,
        updated_at: now,
    }
}

fn create_job_payload() -> CreateJob {
    CreateJob {
        title: "Backend Engineer".to_string(),
        description: "Build services".to_string(),
        requirements: None,
        responsibilities: None,
        job_type: "full_time".to_string(),
        experience_level: "mid".to_string(),
        salary_min: Some(3000),
        salary_max: Some(6000),
        currency: None,
        location: None,
        is_remote: false,
        application_email: None,
        application_url: None,
        expires_at: None,
        category_id: None,
        skills: vec![],
    }
}

#[tokio::test]
async fn test_create_job_requires_employer_role() {
    let service = JobManager::new(Arc::new(TestUnitOfWork::empty()));

    let seeker = Actor {
        id: Uuid::new_v4(),
        email: "seeker@example.com".to_string(),
        role: UserRole::JobSeeker,
    };
    let result = service.create_job(&seeker, create_job_payload()).await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn test_create_job_requires_company() {
    let actor = employer(Uuid::new_v4());

    let mut companies = MockCompanyRepository::new();
    companies
        .expect_find_by_owner()
        .with(eq(actor.id))
        .returning(|_| Ok(None));

    let uow = TestUnitOfWork {
        companies: Arc::new(companies),
        ..TestUnitOfWork::empty()
    };
    let service = JobManager::new(Arc::new(uow));

    let result = service.create_job(&actor, create_job_payload()).await;
    assert!(matches!(result.unwrap_err(), AppError::BadRequest(_)));
}

#[tokio::test]
async fn test_create_job_rejects_inverted_salary_range() {
    let actor = employer(Uuid::new_v4());
    let company_id = Uuid::new_v4();
    let owner = actor.id;

    let mut companies = MockCompanyRepository::new();
    companies
        .expect_find_by_owner()
        .returning(move |_| Ok(Some(test_company(company_id, owner))));

    let uow = TestUnitOfWork {
        companies: Arc::new(companies),
        ..TestUnitOfWork::empty()
    };
    let service = JobManager::new(Arc::new(uow));

    let mut payload = create_job_payload();
    payload.salary_min = Some(9000);
    payload.salary_max = Some(4000);

    let result = service.create_job(&actor, payload).await;
    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn test_create_job_rejects_past_expiry() {
    let actor = employer(Uuid::new_v4());
    let company_id = Uuid::new_v4();
    let owner = actor.id;

    let mut companies = MockCompanyRepository::new();
    companies
        .expect_find_by_owner()
        .returning(move |_| Ok(Some(test_company(company_id, owner))));

    let uow = TestUnitOfWork {
        companies: Arc::new(companies),
        ..TestUnitOfWork::empty()
    };
    let service = JobManager::new(Arc::new(uow));

    let mut payload = create_job_payload();
    payload.expires_at = Some(Utc::now() - Duration::days(1));

    let result = service.create_job(&actor, payload).await;
    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn test_create_job_rejects_unknown_skill() {
    let actor = employer(Uuid::new_v4());
    let company_id = Uuid::new_v4();
    let owner = actor.id;

    let mut companies = MockCompanyRepository::new();
    companies
        .expect_find_by_owner()
        .returning(move |_| Ok(Some(test_company(company_id, owner))));

    let mut skills = MockSkillRepository::new();
    skills.expect_find_existing_ids().returning(|_| Ok(vec![]));

    let uow = TestUnitOfWork {
        companies: Arc::new(companies),
        skills: Arc::new(skills),
        ..TestUnitOfWork::empty()
    };
    let service = JobManager::new(Arc::new(uow));

    let mut payload = create_job_payload();
    payload.skills = vec![jobboard::domain::JobSkill {
        skill_id: Uuid::new_v4(),
        is_required: true,
    }];

    let result = service.create_job(&actor, payload).await;
    assert!(matches!(result.unwrap_err(), AppError::NotFound(_)));
}

#[tokio::test]
async fn test_publish_job_success() {
    let actor = employer(Uuid::new_v4());
    let job_id = Uuid::new_v4();
    let company_id = Uuid::new_v4();
    let owner = actor.id;

    let mut jobs = MockJobRepository::new();
    jobs.expect_find_by_id()
        .with(eq(job_id))
        .returning(move |id| Ok(Some(test_job(id, company_id, JobStatus::Draft))));
    jobs.expect_set_status()
        .with(eq(job_id), eq(JobStatus::Published))
        .returning(move |id, _| Ok(test_job(id, company_id, JobStatus::Published)));

    let mut companies = MockCompanyRepository::new();
    companies
        .expect_find_by_id()
        .with(eq(company_id))
        .returning(move |id| Ok(Some(test_company(id, owner))));

    let uow = TestUnitOfWork {
        jobs: Arc::new(jobs),
        companies: Arc::new(companies),
        ..TestUnitOfWork::empty()
    };
    let service = JobManager::new(Arc::new(uow));

    let job = service.publish_job(&actor, job_id).await.unwrap();
    assert_eq!(job.status, JobStatus::Published);
}

#[tokio::test]
async fn test_republish_from_closed_is_allowed() {
    let actor = employer(Uuid::new_v4());
    let job_id = Uuid::new_v4();
    let company_id = Uuid::new_v4();
    let owner = actor.id;

    let mut jobs = MockJobRepository::new();
    jobs.expect_find_by_id()
        .returning(move |id| Ok(Some(test_job(id, company_id, JobStatus::Closed))));
    jobs.expect_set_status()
        .with(eq(job_id), eq(JobStatus::Published))
        .returning(move |id, _| Ok(test_job(id, company_id, JobStatus::Published)));

    let mut companies = MockCompanyRepository::new();
    companies
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_company(id, owner))));

    let uow = TestUnitOfWork {
        jobs: Arc::new(jobs),
        companies: Arc::new(companies),
        ..TestUnitOfWork::empty()
    };
    let service = JobManager::new(Arc::new(uow));

    assert!(service.publish_job(&actor, job_id).await.is_ok());
}

#[tokio::test]
async fn test_publish_already_published_fails() {
    let actor = employer(Uuid::new_v4());
    let job_id = Uuid::new_v4();
    let company_id = Uuid::new_v4();
    let owner = actor.id;

    let mut jobs = MockJobRepository::new();
    jobs.expect_find_by_id()
        .returning(move |id| Ok(Some(test_job(id, company_id, JobStatus::Published))));

    let mut companies = MockCompanyRepository::new();
    companies
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_company(id, owner))));

    let uow = TestUnitOfWork {
        jobs: Arc::new(jobs),
        companies: Arc::new(companies),
        ..TestUnitOfWork::empty()
    };
    let service = JobManager::new(Arc::new(uow));

    let result = service.publish_job(&actor, job_id).await;
    assert!(matches!(result.unwrap_err(), AppError::BadRequest(_)));
}

#[tokio::test]
async fn test_publish_by_non_owner_is_forbidden() {
    let actor = employer(Uuid::new_v4());
    let job_id = Uuid::new_v4();
    let company_id = Uuid::new_v4();

    let mut jobs = MockJobRepository::new();
    jobs.expect_find_by_id()
        .returning(move |id| Ok(Some(test_job(id, company_id, JobStatus::Draft))));

    let mut companies = MockCompanyRepository::new();
    // Company owned by someone else
    companies
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_company(id, Uuid::new_v4()))));

    let uow = TestUnitOfWork {
        jobs: Arc::new(jobs),
        companies: Arc::new(companies),
        ..TestUnitOfWork::empty()
    };
    let service = JobManager::new(Arc::new(uow));

    let result = service.publish_job(&actor, job_id).await;
    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn test_delete_job_with_applications_fails() {
    let actor = employer(Uuid::new_v4());
    let job_id = Uuid::new_v4();
    let company_id = Uuid::new_v4();
    let owner = actor.id;

    let mut jobs = MockJobRepository::new();
    jobs.expect_find_by_id()
        .returning(move |id| Ok(Some(test_job(id, company_id, JobStatus::Published))));

    let mut companies = MockCompanyRepository::new();
    companies
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_company(id, owner))));

    let mut applications = MockApplicationRepository::new();
    applications.expect_count_for_job().returning(|_| Ok(2));

    let uow = TestUnitOfWork {
        jobs: Arc::new(jobs),
        companies: Arc::new(companies),
        applications: Arc::new(applications),
        ..TestUnitOfWork::empty()
    };
    let service = JobManager::new(Arc::new(uow));

    let result = service.delete_job(&actor, job_id).await;
    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn test_delete_job_without_applications_succeeds() {
    let actor = employer(Uuid::new_v4());
    let job_id = Uuid::new_v4();
    let company_id = Uuid::new_v4();
    let owner = actor.id;

    let mut jobs = MockJobRepository::new();
    jobs.expect_find_by_id()
        .returning(move |id| Ok(Some(test_job(id, company_id, JobStatus::Draft))));
    jobs.expect_delete().with(eq(job_id)).returning(|_| Ok(()));

    let mut companies = MockCompanyRepository::new();
    companies
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_company(id, owner))));

    let mut applications = MockApplicationRepository::new();
    applications.expect_count_for_job().returning(|_| Ok(0));

    let uow = TestUnitOfWork {
        jobs: Arc::new(jobs),
        companies: Arc::new(companies),
        applications: Arc::new(applications),
        ..TestUnitOfWork::empty()
    };
    let service = JobManager::new(Arc::new(uow));

    assert!(service.delete_job(&actor, job_id).await.is_ok());
}

#[tokio::test]
async fn test_get_draft_job_hidden_from_public() {
    let job_id = Uuid::new_v4();
    let company_id = Uuid::new_v4();

    let mut jobs = MockJobRepository::new();
    jobs.expect_find_detail().returning(move |id| {
        Ok(Some(jobboard::domain::JobDetail {
            job: test_job(id, company_id, JobStatus::Draft),
            company_name: Some("Acme Inc".to_string()),
            skills: vec![],
        }))
    });

    let uow = TestUnitOfWork {
        jobs: Arc::new(jobs),
        ..TestUnitOfWork::empty()
    };
    let service = JobManager::new(Arc::new(uow));

    let result = service.get_job(None, job_id).await;
    assert!(matches!(result.unwrap_err(), AppError::NotFound(_)));
}

#[tokio::test]
async fn test_get_draft_job_visible_to_owner() {
    let actor = employer(Uuid::new_v4());
    let job_id = Uuid::new_v4();
    let company_id = Uuid::new_v4();
    let owner = actor.id;

    let mut jobs = MockJobRepository::new();
    jobs.expect_find_detail().returning(move |id| {
        Ok(Some(jobboard::domain::JobDetail {
            job: test_job(id, company_id, JobStatus::Draft),
            company_name: Some("Acme Inc".to_string()),
            skills: vec![],
        }))
    });

    let mut companies = MockCompanyRepository::new();
    companies
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_company(id, owner))));

    let uow = TestUnitOfWork {
        jobs: Arc::new(jobs),
        companies: Arc::new(companies),
        ..TestUnitOfWork::empty()
    };
    let service = JobManager::new(Arc::new(uow));

    assert!(service.get_job(Some(&actor), job_id).await.is_ok());
}

#[tokio::test]
async fn test_search_passes_clamped_pagination() {
    let mut jobs = MockJobRepository::new();
    jobs.expect_search()
        .withf(|_query, page, limit| *page == 1 && *limit == 50)
        .returning(|_, _, _| Ok((vec![], 0)));

    let uow = TestUnitOfWork {
        jobs: Arc::new(jobs),
        ..TestUnitOfWork::empty()
    };
    let service = JobManager::new(Arc::new(uow));

    let page = PageRequest {
        page: -3,
        limit: 1000,
    };
    let result = service
        .search_jobs(jobboard::query::JobFilter::default(), &page)
        .await
        .unwrap();

    assert_eq!(result.page, 1);
    assert_eq!(result.limit, 50);
    assert_eq!(result.total, 0);
}

#[tokio::test]
async fn test_expire_old_jobs_is_idempotent() {
    let mut jobs = MockJobRepository::new();
    // First sweep mutates three rows, the immediate re-run none
    jobs.expect_expire_published()
        .times(1)
        .returning(|_| Ok(3));
    jobs.expect_expire_published()
        .times(1)
        .returning(|_| Ok(0));

    let uow = TestUnitOfWork {
        jobs: Arc::new(jobs),
        ..TestUnitOfWork::empty()
    };
    let service = JobManager::new(Arc::new(uow));

    assert_eq!(service.expire_old_jobs().await.unwrap(), 3);
    assert_eq!(service.expire_old_jobs().await.unwrap(), 0);
}
