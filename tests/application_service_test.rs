//! Application service unit tests against mocked repositories.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use mockall::predicate::eq;
use uuid::Uuid;

use jobboard::domain::{
    Actor, Application, ApplicationStatus, Company, CreateApplication, ExperienceLevel, Job,
    JobStatus, JobType, UserRole,
};
use jobboard::errors::{AppError, AppResult};
use jobboard::infra::{
    ApplicationRepository, CategoryRepository, CompanyRepository, JobRepository,
    MockApplicationRepository, MockCategoryRepository, MockCompanyRepository, MockJobRepository,
    MockSkillRepository, MockUserRepository, SkillRepository, TransactionContext, UnitOfWork,
    UserRepository,
};
use jobboard::services::{ApplicationManager, ApplicationService};

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

fn seeker(id: Uuid) -> Actor {
    Actor {
        id,
        email: "seeker@example.com".to_string(),
        role: UserRole::JobSeeker,
    }
}

fn employer(id: Uuid) -> Actor {
    Actor {
        id,
        email: "employer@example.com".to_string(),
        role: UserRole::Employer,
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
        salary_min: None,
        salary_max: None,
        currency: None,
        location: None,
        is_remote: true,
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

fn test_application(id: Uuid, job_id: Uuid, applicant_id: Uuid, status: ApplicationStatus) -> Application {
    let now = Utc::now();
    Application {
        id,
        job_id,
        applicant_id,
        status,
        cover_letter: None,
        resume_url: None,
        applied_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn test_apply_to_published_job_succeeds() {
    let actor = seeker(Uuid::new_v4());
    let job_id = Uuid::new_v4();
    let applicant = actor.id;

    let mut jobs = MockJobRepository::new();
    jobs.expect_find_by_id()
        .with(eq(job_id))
        .returning(move |id| Ok(Some(test_job(id, Uuid::new_v4(), JobStatus::Published))));

    let mut applications = MockApplicationRepository::new();
    applications
        .expect_find_by_job_and_applicant()
        .with(eq(job_id), eq(applicant))
        .returning(|_, _| Ok(None));
    applications
        .expect_create()
        .returning(move |job_id, applicant_id, _, _| {
            Ok(test_application(
                Uuid::new_v4(),
                job_id,
                applicant_id,
                ApplicationStatus::Pending,
            ))
        });

    let uow = TestUnitOfWork {
        jobs: Arc::new(jobs),
        applications: Arc::new(applications),
        ..TestUnitOfWork::empty()
    };
    let service = ApplicationManager::new(Arc::new(uow));

    let application = service
        .apply_to_job(
            &actor,
            job_id,
            CreateApplication {
                cover_letter: Some("Hello".to_string()),
                resume_url: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(application.status, ApplicationStatus::Pending);
    assert_eq!(application.applicant_id, actor.id);
}

#[tokio::test]
async fn test_apply_requires_job_seeker_role() {
    let actor = employer(Uuid::new_v4());
    let job_id = Uuid::new_v4();

    let mut jobs = MockJobRepository::new();
    jobs.expect_find_by_id()
        .returning(move |id| Ok(Some(test_job(id, Uuid::new_v4(), JobStatus::Published))));

    let uow = TestUnitOfWork {
        jobs: Arc::new(jobs),
        ..TestUnitOfWork::empty()
    };
    let service = ApplicationManager::new(Arc::new(uow));

    let result = service
        .apply_to_job(&actor, job_id, CreateApplication { cover_letter: None, resume_url: None })
        .await;
    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn test_apply_to_unknown_job_is_not_found() {
    let actor = seeker(Uuid::new_v4());

    let mut jobs = MockJobRepository::new();
    jobs.expect_find_by_id().returning(|_| Ok(None));

    let uow = TestUnitOfWork {
        jobs: Arc::new(jobs),
        ..TestUnitOfWork::empty()
    };
    let service = ApplicationManager::new(Arc::new(uow));

    let result = service
        .apply_to_job(&actor, Uuid::new_v4(), CreateApplication { cover_letter: None, resume_url: None })
        .await;
    assert!(matches!(result.unwrap_err(), AppError::NotFound(_)));
}

#[tokio::test]
async fn test_apply_to_closed_job_fails() {
    let actor = seeker(Uuid::new_v4());
    let job_id = Uuid::new_v4();

    let mut jobs = MockJobRepository::new();
    jobs.expect_find_by_id()
        .returning(move |id| Ok(Some(test_job(id, Uuid::new_v4(), JobStatus::Closed))));

    let uow = TestUnitOfWork {
        jobs: Arc::new(jobs),
        ..TestUnitOfWork::empty()
    };
    let service = ApplicationManager::new(Arc::new(uow));

    let result = service
        .apply_to_job(&actor, job_id, CreateApplication { cover_letter: None, resume_url: None })
        .await;
    assert!(matches!(result.unwrap_err(), AppError::BadRequest(_)));
}

#[tokio::test]
async fn test_apply_to_expired_published_job_fails() {
    let actor = seeker(Uuid::new_v4());
    let job_id = Uuid::new_v4();

    let mut jobs = MockJobRepository::new();
    // Published, but the deadline passed before the sweep ran
    jobs.expect_find_by_id().returning(move |id| {
        let mut job = test_job(id, Uuid::new_v4(), JobStatus::Published);
        job.expires_at = Some(Utc::now() - Duration::hours(1));
        Ok(Some(job))
    });

    let uow = TestUnitOfWork {
        jobs: Arc::new(jobs),
        ..TestUnitOfWork::empty()
    };
    let service = ApplicationManager::new(Arc::new(uow));

    let result = service
        .apply_to_job(&actor, job_id, CreateApplication { cover_letter: None, resume_url: None })
        .await;
    assert!(matches!(result.unwrap_err(), AppError::BadRequest(_)));
}

#[tokio::test]
async fn test_duplicate_application_is_conflict() {
    let actor = seeker(Uuid::new_v4());
    let job_id = Uuid::new_v4();

    let mut jobs = MockJobRepository::new();
    jobs.expect_find_by_id()
        .returning(move |id| Ok(Some(test_job(id, Uuid::new_v4(), JobStatus::Published))));

    let mut applications = MockApplicationRepository::new();
    applications
        .expect_find_by_job_and_applicant()
        .returning(move |job_id, applicant_id| {
            Ok(Some(test_application(
                Uuid::new_v4(),
                job_id,
                applicant_id,
                ApplicationStatus::Pending,
            )))
        });

    let uow = TestUnitOfWork {
        jobs: Arc::new(jobs),
        applications: Arc::new(applications),
        ..TestUnitOfWork::empty()
    };
    let service = ApplicationManager::new(Arc::new(uow));

    let result = service
        .apply_to_job(&actor, job_id, CreateApplication { cover_letter: None, resume_url: None })
        .await;
    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn test_lost_race_still_surfaces_conflict() {
    let actor = seeker(Uuid::new_v4());
    let job_id = Uuid::new_v4();

    let mut jobs = MockJobRepository::new();
    jobs.expect_find_by_id()
        .returning(move |id| Ok(Some(test_job(id, Uuid::new_v4(), JobStatus::Published))));

    let mut applications = MockApplicationRepository::new();
    // Pre-check sees nothing, but the unique constraint fires on insert
    applications
        .expect_find_by_job_and_applicant()
        .returning(|_, _| Ok(None));
    applications
        .expect_create()
        .returning(|_, _, _, _| Err(AppError::conflict("Application")));

    let uow = TestUnitOfWork {
        jobs: Arc::new(jobs),
        applications: Arc::new(applications),
        ..TestUnitOfWork::empty()
    };
    let service = ApplicationManager::new(Arc::new(uow));

    let result = service
        .apply_to_job(&actor, job_id, CreateApplication { cover_letter: None, resume_url: None })
        .await;
    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn test_update_status_by_owner_succeeds() {
    let actor = employer(Uuid::new_v4());
    let owner = actor.id;
    let application_id = Uuid::new_v4();
    let job_id = Uuid::new_v4();
    let company_id = Uuid::new_v4();

    let mut applications = MockApplicationRepository::new();
    applications
        .expect_find_by_id()
        .with(eq(application_id))
        .returning(move |id| {
            Ok(Some(test_application(
                id,
                job_id,
                Uuid::new_v4(),
                ApplicationStatus::Pending,
            )))
        });
    applications
        .expect_set_status()
        .with(eq(application_id), eq(ApplicationStatus::Shortlisted))
        .returning(move |id, status| {
            Ok(test_application(id, job_id, Uuid::new_v4(), status))
        });

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
        applications: Arc::new(applications),
        ..TestUnitOfWork::empty()
    };
    let service = ApplicationManager::new(Arc::new(uow));

    let application = service
        .update_status(&actor, application_id, ApplicationStatus::Shortlisted)
        .await
        .unwrap();
    assert_eq!(application.status, ApplicationStatus::Shortlisted);
}

#[tokio::test]
async fn test_update_status_terminal_is_rejected() {
    let actor = employer(Uuid::new_v4());
    let owner = actor.id;
    let application_id = Uuid::new_v4();
    let job_id = Uuid::new_v4();
    let company_id = Uuid::new_v4();

    let mut applications = MockApplicationRepository::new();
    applications.expect_find_by_id().returning(move |id| {
        Ok(Some(test_application(
            id,
            job_id,
            Uuid::new_v4(),
            ApplicationStatus::Rejected,
        )))
    });

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
        applications: Arc::new(applications),
        ..TestUnitOfWork::empty()
    };
    let service = ApplicationManager::new(Arc::new(uow));

    let result = service
        .update_status(&actor, application_id, ApplicationStatus::Reviewed)
        .await;
    assert!(matches!(result.unwrap_err(), AppError::BadRequest(_)));
}

#[tokio::test]
async fn test_update_status_by_non_owner_is_forbidden() {
    let actor = employer(Uuid::new_v4());
    let application_id = Uuid::new_v4();
    let job_id = Uuid::new_v4();
    let company_id = Uuid::new_v4();

    let mut applications = MockApplicationRepository::new();
    applications.expect_find_by_id().returning(move |id| {
        Ok(Some(test_application(
            id,
            job_id,
            Uuid::new_v4(),
            ApplicationStatus::Pending,
        )))
    });

    let mut jobs = MockJobRepository::new();
    jobs.expect_find_by_id()
        .returning(move |id| Ok(Some(test_job(id, company_id, JobStatus::Published))));

    let mut companies = MockCompanyRepository::new();
    companies
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_company(id, Uuid::new_v4()))));

    let uow = TestUnitOfWork {
        jobs: Arc::new(jobs),
        companies: Arc::new(companies),
        applications: Arc::new(applications),
        ..TestUnitOfWork::empty()
    };
    let service = ApplicationManager::new(Arc::new(uow));

    let result = service
        .update_status(&actor, application_id, ApplicationStatus::Reviewed)
        .await;
    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}
